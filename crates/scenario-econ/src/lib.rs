#![deny(warnings)]

//! Demand transforms and metric aggregators for scenario simulation.
//!
//! This module provides the pure building blocks composed by the runtime:
//! - Series growth, promotional uplift and price elasticity transforms
//! - Inventory coverage and lead-time stockout exposure
//! - Revenue and margin
//!
//! Every function is total: degenerate inputs (empty series, zero or negative
//! parameters) produce defined values instead of errors, and nothing is
//! clamped unless stated.

use scenario_core::{LeadTimeImpact, TimeSeries, TimeSeriesPoint};

/// Conventional price elasticity of demand used by the orchestrator.
pub const DEFAULT_ELASTICITY: f64 = -1.3;

/// Lead time at which stockout risk saturates at 100%.
pub const RISK_SATURATION_DAYS: f64 = 30.0;

/// Length of one series period in days.
pub const PERIOD_DAYS: f64 = 7.0;

/// Scale every value of `series` by `(1 + growth_pct)`, keeping dates.
///
/// Example:
/// let grown = forecast_demand(&series, 0.15); // +15%
pub fn forecast_demand(series: &[TimeSeriesPoint], growth_pct: f64) -> TimeSeries {
    let factor = 1.0 + growth_pct;
    map_values(series, |v| v * factor)
}

/// Promotional uplift: `value * multiplier`. Zero or negative multipliers are
/// computed as given.
pub fn promo_uplift(value: f64, multiplier: f64) -> f64 {
    value * multiplier
}

/// Demand response to a relative price change: `value * (1 + e * pct)`.
///
/// Not clamped: with a negative elasticity, a price increase larger than
/// `-1 / elasticity` yields a negative value.
///
/// Example:
/// assert_eq!(price_elasticity(100.0, 0.0, DEFAULT_ELASTICITY), 100.0);
pub fn price_elasticity(value: f64, price_change_pct: f64, elasticity: f64) -> f64 {
    value * (1.0 + elasticity * price_change_pct)
}

/// Apply `promo_uplift` to each point.
pub fn apply_promo(series: &[TimeSeriesPoint], multiplier: f64) -> TimeSeries {
    map_values(series, |v| promo_uplift(v, multiplier))
}

/// Apply `price_elasticity` to each point.
pub fn apply_price_elasticity(
    series: &[TimeSeriesPoint],
    price_change_pct: f64,
    elasticity: f64,
) -> TimeSeries {
    map_values(series, |v| price_elasticity(v, price_change_pct, elasticity))
}

fn map_values(series: &[TimeSeriesPoint], f: impl Fn(f64) -> f64) -> TimeSeries {
    series
        .iter()
        .map(|p| TimeSeriesPoint::new(p.date, f(p.value)))
        .collect()
}

/// Sum of all values, in sequence order. Empty series sums to 0.
pub fn total_units(series: &[TimeSeriesPoint]) -> f64 {
    series.iter().map(|p| p.value).sum()
}

/// Arithmetic mean of the values, `None` for an empty series.
pub fn mean_value(series: &[TimeSeriesPoint]) -> Option<f64> {
    if series.is_empty() {
        return None;
    }
    Some(total_units(series) / series.len() as f64)
}

/// Periods of demand covered by `stock_on_hand`: `stock / mean`.
///
/// Returns 0 for an empty series or a non-positive mean.
pub fn inventory_coverage(series: &[TimeSeriesPoint], stock_on_hand: f64) -> f64 {
    match mean_value(series) {
        Some(mean) if mean > 0.0 => stock_on_hand / mean,
        _ => 0.0,
    }
}

/// Stockout exposure over `series` for a replenishment lead time.
///
/// Risk ramps linearly from 0% to 100% over `RISK_SATURATION_DAYS` and stays
/// at 100% beyond. An empty series yields an all-zero result.
///
/// Example:
/// let r = lead_time_impact(&series_of_two_50s, 15.0);
/// // r.stockout_risk_pct == 50, r.impacted_periods == 3, r.demand_at_risk == 50
pub fn lead_time_impact(series: &[TimeSeriesPoint], lead_time_days: f64) -> LeadTimeImpact {
    if series.is_empty() {
        return LeadTimeImpact::default();
    }
    let stockout_risk_pct = (lead_time_days / RISK_SATURATION_DAYS).min(1.0) * 100.0;
    LeadTimeImpact {
        stockout_risk_pct,
        availability_shift_days: lead_time_days,
        impacted_periods: (lead_time_days / PERIOD_DAYS).ceil(),
        demand_at_risk: total_units(series) * (stockout_risk_pct / 100.0),
    }
}

/// Revenue: total units times `unit_price`.
pub fn revenue(series: &[TimeSeriesPoint], unit_price: f64) -> f64 {
    total_units(series) * unit_price
}

/// Gross margin: `revenue * (1 - cogs_pct)`. `cogs_pct` is not range checked.
pub fn margin(revenue_value: f64, cogs_pct: f64) -> f64 {
    revenue_value * (1.0 - cogs_pct)
}
