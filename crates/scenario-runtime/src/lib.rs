#![deny(warnings)]

//! Scenario orchestrator: "current vs. simulated" metrics for one entity.
//!
//! The simulated series is built by applying, in this order:
//! 1. demand growth (`demand_growth_pct`)
//! 2. promotional uplift (`promo_multiplier`)
//! 3. price elasticity (`price_change_pct`)
//!
//! Growth runs first so that promotion and pricing shocks scale the grown
//! trend. Each stage is skipped when its parameter is neutral.

use rayon::prelude::*;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use scenario_core::{
    Entity, EntityCategory, EntityRegistry, MetricBundle, ScenarioParams, ScenarioResult,
    SimulatedBundle, TimeSeries, TimeSeriesPoint,
};
use scenario_econ as econ;
use tracing::debug;

/// Multiplier turning periods of coverage into a service-level score.
const COVERAGE_SCORE_PER_PERIOD: f64 = 10.0;

const MAX_SERVICE_LEVEL: f64 = 100.0;

/// Run one scenario. A missing entity or an empty series yields
/// [`ScenarioResult::neutral`].
pub fn simulate(entity: Option<&Entity>, params: &ScenarioParams) -> ScenarioResult {
    let Some(entity) = entity.filter(|e| !e.series.is_empty()) else {
        debug!("no entity data, returning neutral scenario");
        return ScenarioResult::neutral();
    };
    let price = entity.unit_price();
    let cogs = entity.cogs_pct();
    debug!(
        points = entity.series.len(),
        price,
        cogs,
        ?params,
        "simulating scenario"
    );

    let current_coverage = econ::inventory_coverage(&entity.series, params.stock_available);
    let current_service = (current_coverage * COVERAGE_SCORE_PER_PERIOD).min(MAX_SERVICE_LEVEL);
    let current = bundle(entity.series.clone(), price, cogs, current_service);

    let simulated_series = simulate_series(&entity.series, params);
    let adjusted_price = price * (1.0 + params.price_change_pct);
    let lead_time_impact = econ::lead_time_impact(&simulated_series, params.lead_time_days);
    let simulated_coverage = econ::inventory_coverage(&simulated_series, params.stock_available);
    let simulated_service = (simulated_coverage * COVERAGE_SCORE_PER_PERIOD
        - lead_time_impact.stockout_risk_pct)
        .clamp(0.0, MAX_SERVICE_LEVEL);

    let simulated = SimulatedBundle {
        metrics: bundle(simulated_series, adjusted_price, cogs, simulated_service),
        price_change_pct_realized: realized_change_pct(price, adjusted_price),
        lead_time_impact,
    };
    ScenarioResult { current, simulated }
}

/// Resolve `id` through `registry` and run the scenario. Unknown ids behave
/// like a missing entity.
pub fn simulate_entity<R>(
    registry: &R,
    category: EntityCategory,
    id: &str,
    params: &ScenarioParams,
) -> ScenarioResult
where
    R: EntityRegistry + ?Sized,
{
    let entity = registry.entity(category, id);
    if entity.is_none() {
        debug!(%category, id, "entity not found in registry");
    }
    simulate(entity, params)
}

/// Run several parameter sets against the same entity in parallel. Results
/// keep the order of `params`.
pub fn simulate_many(entity: Option<&Entity>, params: &[ScenarioParams]) -> Vec<ScenarioResult> {
    params.par_iter().map(|p| simulate(entity, p)).collect()
}

/// Build the simulated demand series. Stages run growth, then promotion, then
/// price elasticity, each consuming the previous stage's output.
pub fn simulate_series(series: &[TimeSeriesPoint], params: &ScenarioParams) -> TimeSeries {
    let mut out = series.to_vec();
    if params.demand_growth_pct != 0.0 {
        out = econ::forecast_demand(&out, params.demand_growth_pct);
    }
    if params.promo_multiplier != 1.0 {
        out = econ::apply_promo(&out, params.promo_multiplier);
    }
    if params.price_change_pct != 0.0 {
        out = econ::apply_price_elasticity(&out, params.price_change_pct, econ::DEFAULT_ELASTICITY);
    }
    out
}

fn bundle(series: TimeSeries, unit_price: f64, cogs_pct: f64, service_level: f64) -> MetricBundle {
    let revenue = econ::revenue(&series, unit_price);
    let margin = econ::margin(revenue, cogs_pct);
    MetricBundle {
        revenue: round_money(revenue),
        units: econ::total_units(&series).round(),
        margin: round_money(margin),
        service_level,
        series,
    }
}

fn realized_change_pct(original_price: f64, adjusted_price: f64) -> f64 {
    if original_price == 0.0 {
        return 0.0;
    }
    (adjusted_price / original_price - 1.0) * 100.0
}

/// Round to whole currency units, halves away from zero. Values outside the
/// decimal range (or non-finite) collapse to zero.
pub fn round_money(value: f64) -> Decimal {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .unwrap_or(Decimal::ZERO)
}
