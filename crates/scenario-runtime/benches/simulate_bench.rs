use criterion::{black_box, criterion_group, criterion_main, Criterion};
use scenario_core::{Entity, ScenarioParams, TimeSeriesPoint};

fn weekly_entity(weeks: u64) -> Entity {
    let start = chrono::NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
    let series = (0..weeks)
        .map(|i| {
            TimeSeriesPoint::new(
                start + chrono::Days::new(7 * i),
                900.0 + (i % 13) as f64 * 25.0,
            )
        })
        .collect();
    Entity::new(series).with_price(12.5).with_cogs(0.65)
}

fn bench_simulate(c: &mut Criterion) {
    let entity = weekly_entity(52);
    let params = ScenarioParams {
        demand_growth_pct: 0.1,
        price_change_pct: 0.05,
        promo_multiplier: 1.2,
        lead_time_days: 14.0,
        stock_available: 5_000.0,
    };
    c.bench_function("simulate 52 weeks", |b| {
        b.iter(|| black_box(scenario_runtime::simulate(Some(&entity), &params)))
    });

    let sweep: Vec<ScenarioParams> = (0..256)
        .map(|i| ScenarioParams {
            demand_growth_pct: (i % 16) as f64 * 0.02,
            price_change_pct: (i / 16) as f64 * 0.01,
            ..ScenarioParams::default()
        })
        .collect();
    c.bench_function("simulate_many 256 scenarios", |b| {
        b.iter(|| black_box(scenario_runtime::simulate_many(Some(&entity), &sweep)))
    });
}

criterion_group!(benches, bench_simulate);
criterion_main!(benches);
