//! End-to-end checks: shipped catalog and scenario files through the runtime.

use catalog::InMemoryCatalog;
use rust_decimal::Decimal;
use scenario_core::{EntityCategory, EntityRegistry, ScenarioParams, ScenarioResult};
use scenario_runtime::simulate_entity;
use std::path::PathBuf;

fn assets() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../assets")
}

fn demo() -> InMemoryCatalog {
    InMemoryCatalog::load(assets().join("catalog/demo.yaml")).unwrap()
}

fn scenario(name: &str) -> ScenarioParams {
    let text = std::fs::read_to_string(assets().join("scenarios").join(name)).unwrap();
    serde_yaml::from_str(&text).unwrap()
}

#[test]
fn demo_catalog_loads_every_category() {
    let cat = demo();
    assert_eq!(cat.len(), 5);
    for category in EntityCategory::ALL {
        assert!(!cat.ids(category).is_empty(), "no {category} entries");
    }
}

#[test]
fn sample_product_growth_scenario() {
    let cat = demo();
    let params = ScenarioParams {
        demand_growth_pct: 0.1,
        ..ScenarioParams::default()
    };
    let r = simulate_entity(&cat, EntityCategory::Product, "sku-sample", &params);
    assert_eq!(r.current.units, 200.0);
    assert_eq!(r.current.revenue, Decimal::new(2500, 0));
    assert_eq!(r.current.margin, Decimal::new(875, 0));
    assert_eq!(r.simulated.metrics.units, 220.0);
    assert_eq!(r.simulated.metrics.revenue, Decimal::new(2750, 0));
    assert_eq!(r.simulated.metrics.margin, Decimal::new(963, 0));
}

#[test]
fn zone_lead_time_exposure() {
    let cat = demo();
    let params = ScenarioParams {
        lead_time_days: 15.0,
        ..ScenarioParams::default()
    };
    let r = simulate_entity(&cat, EntityCategory::Zone, "north", &params);
    let lt = &r.simulated.lead_time_impact;
    assert_eq!(lt.stockout_risk_pct, 50.0);
    assert_eq!(lt.impacted_periods, 3.0);
    assert_eq!(lt.demand_at_risk, 50.0);
}

#[test]
fn zone_without_series_is_neutral() {
    let cat = demo();
    assert!(cat.entity(EntityCategory::Zone, "south").is_some());
    let r = simulate_entity(&cat, EntityCategory::Zone, "south", &scenario("summer_promo.yaml"));
    assert_eq!(r, ScenarioResult::neutral());
}

#[test]
fn shipped_scenarios_parse_with_defaults() {
    let p = scenario("growth_and_price.yaml");
    assert_eq!(p.demand_growth_pct, 0.10);
    assert_eq!(p.promo_multiplier, 1.0);
    assert_eq!(p.stock_available, 1000.0);

    let cat = demo();
    let r = simulate_entity(&cat, EntityCategory::Product, "sku-espresso", &p);
    assert!(r.simulated.price_change_pct_realized > 4.99);
    assert!(r.simulated.metrics.units > r.current.units);
}

#[test]
fn generated_demo_catalog_runs() {
    let cat = catalog::fixtures::demo_catalog(7).unwrap();
    let r = simulate_entity(&cat, EntityCategory::Kpi, "weekly-orders", &ScenarioParams::default());
    assert!(r.current.units > 0.0);
    assert_eq!(r.simulated.metrics.units, r.current.units);
}
