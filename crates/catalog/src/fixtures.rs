//! Seeded demo data: weekly demand series and a small catalog.

use crate::{CatalogError, InMemoryCatalog};
use chrono::{Days, NaiveDate};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use scenario_core::{Entity, EntityCategory, TimeSeries, TimeSeriesPoint};

/// Days between consecutive generated points.
pub const FIXTURE_STEP_DAYS: u64 = 7;

/// Weekly series around `base` with multiplicative uniform noise in
/// `[1 - noise_frac, 1 + noise_frac]`, rounded to whole units and floored at 0.
///
/// Deterministic for a given `seed`. `noise_frac` must be in [0, 1).
pub fn generate_series(
    start: NaiveDate,
    periods: usize,
    base: f64,
    noise_frac: f64,
    seed: u64,
) -> Result<TimeSeries, CatalogError> {
    if !noise_frac.is_finite() || !(0.0..1.0).contains(&noise_frac) {
        return Err(CatalogError::InvalidFixture(format!(
            "noise fraction {noise_frac} outside [0, 1)"
        )));
    }
    if !base.is_finite() || base < 0.0 {
        return Err(CatalogError::InvalidFixture(format!("base demand {base}")));
    }
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut series = Vec::with_capacity(periods);
    let mut date = start;
    for _ in 0..periods {
        let factor = if noise_frac == 0.0 {
            1.0
        } else {
            1.0 + rng.gen_range(-noise_frac..=noise_frac)
        };
        series.push(TimeSeriesPoint::new(date, (base * factor).round().max(0.0)));
        date = date
            .checked_add_days(Days::new(FIXTURE_STEP_DAYS))
            .ok_or_else(|| CatalogError::InvalidFixture("date overflow".to_string()))?;
    }
    Ok(series)
}

struct DemoEntity {
    category: EntityCategory,
    id: &'static str,
    name: &'static str,
    base: f64,
    price: Option<f64>,
    cogs: Option<f64>,
}

const DEMO_ENTITIES: &[DemoEntity] = &[
    DemoEntity {
        category: EntityCategory::Kpi,
        id: "weekly-orders",
        name: "Weekly orders",
        base: 1_200.0,
        price: None,
        cogs: None,
    },
    DemoEntity {
        category: EntityCategory::Product,
        id: "sku-espresso",
        name: "Espresso beans 1kg",
        base: 420.0,
        price: Some(14.0),
        cogs: Some(0.55),
    },
    DemoEntity {
        category: EntityCategory::Product,
        id: "sku-grinder",
        name: "Burr grinder",
        base: 35.0,
        price: Some(89.0),
        cogs: Some(0.7),
    },
    DemoEntity {
        category: EntityCategory::Zone,
        id: "north",
        name: "North region",
        base: 640.0,
        price: None,
        cogs: None,
    },
    DemoEntity {
        category: EntityCategory::Zone,
        id: "south",
        name: "South region",
        base: 510.0,
        price: None,
        cogs: None,
    },
];

/// Twelve weeks of data for one KPI, two products and two zones.
pub fn demo_catalog(seed: u64) -> Result<InMemoryCatalog, CatalogError> {
    let start = NaiveDate::from_ymd_opt(2025, 1, 6)
        .ok_or_else(|| CatalogError::InvalidFixture("start date".to_string()))?;
    let mut catalog = InMemoryCatalog::new();
    for (i, d) in DEMO_ENTITIES.iter().enumerate() {
        let series = generate_series(start, 12, d.base, 0.15, seed.wrapping_add(i as u64))?;
        let entity = Entity {
            name: Some(d.name.to_string()),
            series,
            price: d.price,
            cogs: d.cogs,
        };
        catalog.insert(d.category, d.id, entity)?;
    }
    Ok(catalog)
}
