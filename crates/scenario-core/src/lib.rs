#![deny(warnings)]

//! Core data model for the scenario-simulation engine.
//!
//! This crate defines the serializable types shared by the transforms, the
//! orchestrator and the catalog: dated demand series, the entities that own
//! them, scenario parameters and the "current vs. simulated" result bundles.
//! Field names serialize in camelCase so documents produced for the dashboard
//! can be read back without translation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Unit price applied when an entity does not carry one.
pub const DEFAULT_UNIT_PRICE: f64 = 12.50;

/// Cost-of-goods fraction applied when an entity does not carry one.
pub const DEFAULT_COGS_PCT: f64 = 0.65;

/// One dated observation, e.g. units sold in the week starting at `date`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    /// Calendar date of the period (ISO `YYYY-MM-DD`).
    pub date: NaiveDate,
    /// Observed value (non-negative for baseline data).
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Chronologically ascending sequence of points. Order is significant and is
/// never changed by the engine.
pub type TimeSeries = Vec<TimeSeriesPoint>;

/// Registry partition an entity belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityCategory {
    /// Headline business indicator.
    Kpi,
    /// Sellable product line.
    Product,
    /// Geographic or logistic zone.
    Zone,
}

impl EntityCategory {
    pub const ALL: [EntityCategory; 3] = [Self::Kpi, Self::Product, Self::Zone];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Kpi => "kpi",
            Self::Product => "product",
            Self::Zone => "zone",
        }
    }
}

impl fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kpi" | "kpis" => Ok(Self::Kpi),
            "product" | "products" => Ok(Self::Product),
            "zone" | "zones" => Ok(Self::Zone),
            other => Err(CoreError::UnknownCategory(other.to_string())),
        }
    }
}

/// Errors produced when interpreting core types from text.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// Category name is not one of `kpi`, `product`, `zone`.
    #[error("unknown entity category: {0}")]
    UnknownCategory(String),
}

/// A KPI, product or zone with its baseline series and pricing attributes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Display label, if the registry provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Baseline demand series.
    #[serde(default)]
    pub series: TimeSeries,
    /// Unit price; `DEFAULT_UNIT_PRICE` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Cost of goods as a fraction of revenue; `DEFAULT_COGS_PCT` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cogs: Option<f64>,
}

impl Entity {
    pub fn new(series: TimeSeries) -> Self {
        Self {
            series,
            ..Self::default()
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_cogs(mut self, cogs: f64) -> Self {
        self.cogs = Some(cogs);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Unit price with the default applied.
    pub fn unit_price(&self) -> f64 {
        self.price.unwrap_or(DEFAULT_UNIT_PRICE)
    }

    /// COGS fraction with the default applied.
    pub fn cogs_pct(&self) -> f64 {
        self.cogs.unwrap_or(DEFAULT_COGS_PCT)
    }
}

/// Read-only lookup of entities by category and id.
///
/// The orchestrator receives an implementation explicitly; it never reaches
/// for a process-wide catalog.
pub trait EntityRegistry {
    fn entity(&self, category: EntityCategory, id: &str) -> Option<&Entity>;
}

impl<R: EntityRegistry + ?Sized> EntityRegistry for &R {
    fn entity(&self, category: EntityCategory, id: &str) -> Option<&Entity> {
        (**self).entity(category, id)
    }
}

/// What-if parameters. Missing fields take the documented defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScenarioParams {
    /// Demand growth as a fraction (0.10 = +10%).
    pub demand_growth_pct: f64,
    /// Price change as a fraction (0.05 = +5%).
    pub price_change_pct: f64,
    /// Promotional demand multiplier (1 = no promotion).
    pub promo_multiplier: f64,
    /// Replenishment lead time in days.
    pub lead_time_days: f64,
    /// Stock on hand, in series units.
    pub stock_available: f64,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            demand_growth_pct: 0.0,
            price_change_pct: 0.0,
            promo_multiplier: 1.0,
            lead_time_days: 7.0,
            stock_available: 1000.0,
        }
    }
}

impl ScenarioParams {
    /// True when no demand or price transform would be applied.
    pub fn is_neutral(&self) -> bool {
        self.demand_growth_pct == 0.0 && self.price_change_pct == 0.0 && self.promo_multiplier == 1.0
    }
}

/// Stockout exposure derived from the replenishment lead time.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadTimeImpact {
    /// Risk of stocking out, 0..=100, saturating at a 30-day lead time.
    pub stockout_risk_pct: f64,
    /// Days by which availability shifts.
    pub availability_shift_days: f64,
    /// Number of 7-day periods touched by the lead time.
    pub impacted_periods: f64,
    /// Units of demand exposed to the stockout risk.
    pub demand_at_risk: f64,
}

/// Metrics computed from one series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricBundle {
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
    pub units: f64,
    #[serde(with = "rust_decimal::serde::float")]
    pub margin: Decimal,
    /// Heuristic 0..=100 score.
    pub service_level: f64,
    pub series: TimeSeries,
}

impl MetricBundle {
    /// Zero metrics with a full service level, used when input data is missing.
    pub fn neutral() -> Self {
        Self {
            revenue: Decimal::ZERO,
            units: 0.0,
            margin: Decimal::ZERO,
            service_level: 100.0,
            series: Vec::new(),
        }
    }
}

/// Simulated metrics plus scenario-only details.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatedBundle {
    #[serde(flatten)]
    pub metrics: MetricBundle,
    /// Price change actually applied, in percent.
    pub price_change_pct_realized: f64,
    pub lead_time_impact: LeadTimeImpact,
}

impl SimulatedBundle {
    pub fn neutral() -> Self {
        Self {
            metrics: MetricBundle::neutral(),
            price_change_pct_realized: 0.0,
            lead_time_impact: LeadTimeImpact::default(),
        }
    }
}

/// Baseline and simulated bundles for one entity and one parameter set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub current: MetricBundle,
    pub simulated: SimulatedBundle,
}

impl ScenarioResult {
    /// Result returned when the entity or its series is missing.
    pub fn neutral() -> Self {
        Self {
            current: MetricBundle::neutral(),
            simulated: SimulatedBundle::neutral(),
        }
    }

    /// Simulated minus current, per metric.
    pub fn delta(&self) -> ScenarioDelta {
        let cur = &self.current;
        let sim = &self.simulated.metrics;
        ScenarioDelta {
            revenue: sim.revenue - cur.revenue,
            units: sim.units - cur.units,
            margin: sim.margin - cur.margin,
            service_level: sim.service_level - cur.service_level,
        }
    }
}

/// Per-metric difference between the simulated and current bundles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioDelta {
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
    pub units: f64,
    #[serde(with = "rust_decimal::serde::float")]
    pub margin: Decimal,
    pub service_level: f64,
}
