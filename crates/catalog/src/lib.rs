#![deny(warnings)]

//! Entity catalog: an in-memory [`EntityRegistry`] backed by YAML or JSON.
//!
//! A catalog file lists entities per category:
//!
//! ```yaml
//! products:
//!   - id: sku-espresso
//!     name: Espresso beans
//!     price: 14.0
//!     cogs: 0.55
//!     series:
//!       - { date: 2025-01-06, value: 420 }
//!       - { date: 2025-01-13, value: 445 }
//! ```

pub mod fixtures;

use scenario_core::{Entity, EntityCategory, EntityRegistry};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("io error: {0}")]
    Io(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("duplicate {category} id: {id}")]
    DuplicateId { category: EntityCategory, id: String },
    #[error("series for {id} is not in chronological order")]
    UnsortedSeries { id: String },
    #[error("unsupported catalog format: {0}")]
    UnsupportedFormat(String),
    #[error("invalid fixture parameters: {0}")]
    InvalidFixture(String),
}

impl From<std::io::Error> for CatalogError {
    fn from(e: std::io::Error) -> Self {
        CatalogError::Io(e.to_string())
    }
}

impl From<serde_yaml::Error> for CatalogError {
    fn from(e: serde_yaml::Error) -> Self {
        CatalogError::Parse(e.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Parse(e.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    id: String,
    #[serde(flatten)]
    entity: Entity,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    kpis: Vec<CatalogEntry>,
    #[serde(default)]
    products: Vec<CatalogEntry>,
    #[serde(default)]
    zones: Vec<CatalogEntry>,
}

/// Entities keyed by category and id, remembering insertion order.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalog {
    entities: HashMap<(EntityCategory, String), Entity>,
    order: Vec<(EntityCategory, String)>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog file, choosing the format from the extension
    /// (`.yaml`, `.yml` or `.json`).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let text = fs::read_to_string(path)?;
        let catalog = match ext.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&text)?,
            "json" => Self::from_json_str(&text)?,
            other => return Err(CatalogError::UnsupportedFormat(other.to_string())),
        };
        info!(path = %path.display(), entities = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(text)?;
        Self::from_file(file)
    }

    pub fn from_json_str(text: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(text)?;
        Self::from_file(file)
    }

    fn from_file(file: CatalogFile) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        let groups = [
            (EntityCategory::Kpi, file.kpis),
            (EntityCategory::Product, file.products),
            (EntityCategory::Zone, file.zones),
        ];
        for (category, entries) in groups {
            for entry in entries {
                if !is_chronological(&entry.entity) {
                    return Err(CatalogError::UnsortedSeries { id: entry.id });
                }
                catalog.insert(category, entry.id, entry.entity)?;
            }
        }
        Ok(catalog)
    }

    /// Add an entity. Ids must be unique within a category.
    pub fn insert(
        &mut self,
        category: EntityCategory,
        id: impl Into<String>,
        entity: Entity,
    ) -> Result<(), CatalogError> {
        let key = (category, id.into());
        if self.entities.contains_key(&key) {
            return Err(CatalogError::DuplicateId {
                category,
                id: key.1,
            });
        }
        self.order.push(key.clone());
        self.entities.insert(key, entity);
        Ok(())
    }

    /// Ids of one category in insertion order.
    pub fn ids(&self, category: EntityCategory) -> Vec<&str> {
        self.order
            .iter()
            .filter(|(c, _)| *c == category)
            .map(|(_, id)| id.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl EntityRegistry for InMemoryCatalog {
    fn entity(&self, category: EntityCategory, id: &str) -> Option<&Entity> {
        self.entities.get(&(category, id.to_string()))
    }
}

fn is_chronological(entity: &Entity) -> bool {
    entity.series.windows(2).all(|w| w[0].date <= w[1].date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use scenario_core::TimeSeriesPoint;

    const SAMPLE: &str = r#"
kpis:
  - id: weekly-orders
    series:
      - { date: 2025-01-06, value: 950 }
      - { date: 2025-01-13, value: 1010.5 }
products:
  - id: sku-1
    name: Widget
    price: 20.0
    cogs: 0.4
    series:
      - { date: 2025-01-06, value: 10 }
zones:
  - id: north
"#;

    #[test]
    fn parses_yaml_with_defaults() {
        let cat = InMemoryCatalog::from_yaml_str(SAMPLE).unwrap();
        assert_eq!(cat.len(), 3);
        let kpi = cat.entity(EntityCategory::Kpi, "weekly-orders").unwrap();
        assert_eq!(kpi.series.len(), 2);
        assert_eq!(kpi.series[1].value, 1010.5);
        assert_eq!(kpi.price, None);
        let sku = cat.entity(EntityCategory::Product, "sku-1").unwrap();
        assert_eq!(sku.unit_price(), 20.0);
        assert_eq!(sku.name.as_deref(), Some("Widget"));
        let zone = cat.entity(EntityCategory::Zone, "north").unwrap();
        assert!(zone.series.is_empty());
        assert!(cat.entity(EntityCategory::Product, "north").is_none());
    }

    #[test]
    fn parses_json() {
        let cat = InMemoryCatalog::from_json_str(
            r#"{"zones":[{"id":"south","price":9.5,"series":[{"date":"2025-02-03","value":4}]}]}"#,
        )
        .unwrap();
        assert_eq!(cat.ids(EntityCategory::Zone), vec!["south"]);
        assert!(cat.ids(EntityCategory::Kpi).is_empty());
    }

    #[test]
    fn rejects_duplicates() {
        let mut cat = InMemoryCatalog::new();
        cat.insert(EntityCategory::Kpi, "a", Entity::default()).unwrap();
        // same id in another category is fine
        cat.insert(EntityCategory::Zone, "a", Entity::default()).unwrap();
        assert_eq!(
            cat.insert(EntityCategory::Kpi, "a", Entity::default()),
            Err(CatalogError::DuplicateId {
                category: EntityCategory::Kpi,
                id: "a".to_string()
            })
        );
    }

    #[test]
    fn rejects_unsorted_series() {
        let text = r#"
products:
  - id: backwards
    series:
      - { date: 2025-01-13, value: 1 }
      - { date: 2025-01-06, value: 2 }
"#;
        assert_eq!(
            InMemoryCatalog::from_yaml_str(text).unwrap_err(),
            CatalogError::UnsortedSeries {
                id: "backwards".to_string()
            }
        );
    }

    #[test]
    fn bad_date_is_parse_error() {
        let text = "kpis:\n  - id: x\n    series:\n      - { date: not-a-date, value: 1 }\n";
        assert!(matches!(
            InMemoryCatalog::from_yaml_str(text),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn insertion_order_is_kept() {
        let mut cat = InMemoryCatalog::new();
        let d = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        for id in ["c", "a", "b"] {
            cat.insert(
                EntityCategory::Product,
                id,
                Entity::new(vec![TimeSeriesPoint::new(d, 1.0)]),
            )
            .unwrap();
        }
        assert_eq!(cat.ids(EntityCategory::Product), vec!["c", "a", "b"]);
    }

    #[test]
    fn unsupported_extension() {
        let path = std::env::temp_dir().join("scenario-catalog-test.toml");
        fs::write(&path, "x = 1").unwrap();
        assert_eq!(
            InMemoryCatalog::load(&path).unwrap_err(),
            CatalogError::UnsupportedFormat("toml".to_string())
        );
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            InMemoryCatalog::load("/definitely/not/here.yaml"),
            Err(CatalogError::Io(_))
        ));
    }
}
