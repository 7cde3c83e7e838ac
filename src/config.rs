//! Column selection and key-matching configuration.
//!
//! Every pipeline run is driven by a [`SplitConfig`]: the four column
//! selections plus the key-matching policies. Selections are resolved once
//! from up to three layers (built-in defaults, an optional YAML columns
//! file, explicit CLI flags; later layers win) and validated against the
//! actual datasets before any row is processed.

use std::borrow::Cow;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dataset::Dataset;

pub const DEFAULT_ORDER_BARCODE_COLUMN: &str = "Код EAN/UPC";
pub const DEFAULT_ORDER_SHOP_COLUMN: &str = "Завод";
pub const DEFAULT_SCHEDULE_SHOP_COLUMN: &str = "shop_code";
pub const DEFAULT_SCHEDULE_DAY_COLUMN: &str = "allowed_weekday";

/// Minimum number of columns the mapping dataset must carry: the new value
/// in the first column, the old value in the second.
pub const MAPPING_REQUIRED_COLUMNS: usize = 2;

/// A column selection or dataset shape problem, detected before any row
/// processing starts. Data-quality conditions (unmapped barcodes, unmatched
/// shops, unrecognized weekday text) are never errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("column '{column}' not found in the {dataset} dataset")]
    MissingColumn {
        dataset: &'static str,
        column: String,
    },
    #[error("the {dataset} dataset must have at least {required} columns, found {found}")]
    NotEnoughColumns {
        dataset: &'static str,
        required: usize,
        found: usize,
    },
    #[error("column '{column}' appears more than once in the {dataset} dataset")]
    DuplicateColumn {
        dataset: &'static str,
        column: String,
    },
}

/// How lookup keys are normalized before comparison. Both policies trim
/// surrounding whitespace first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[value(rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum MatchPolicy {
    Exact,
    IgnoreCase,
}

impl MatchPolicy {
    pub fn normalize<'a>(self, raw: &'a str) -> Cow<'a, str> {
        let trimmed = raw.trim();
        match self {
            MatchPolicy::Exact => Cow::Borrowed(trimmed),
            MatchPolicy::IgnoreCase => Cow::Owned(trimmed.to_lowercase()),
        }
    }
}

/// A partial column selection: one resolution layer. The YAML columns file
/// deserializes into this shape, and CLI flags are collected into it too.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnSelection {
    pub order_barcode_column: Option<String>,
    pub order_shop_column: Option<String>,
    pub schedule_shop_column: Option<String>,
    pub schedule_day_column: Option<String>,
    pub barcode_keys: Option<MatchPolicy>,
    pub shop_keys: Option<MatchPolicy>,
}

impl ColumnSelection {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Opening columns file {path:?}"))?;
        serde_yaml::from_str(&raw).with_context(|| format!("Parsing columns file {path:?}"))
    }
}

/// The fully resolved configuration a pipeline run owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitConfig {
    pub order_barcode_column: String,
    pub order_shop_column: String,
    pub schedule_shop_column: String,
    pub schedule_day_column: String,
    pub barcode_keys: MatchPolicy,
    pub shop_keys: MatchPolicy,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            order_barcode_column: DEFAULT_ORDER_BARCODE_COLUMN.to_string(),
            order_shop_column: DEFAULT_ORDER_SHOP_COLUMN.to_string(),
            schedule_shop_column: DEFAULT_SCHEDULE_SHOP_COLUMN.to_string(),
            schedule_day_column: DEFAULT_SCHEDULE_DAY_COLUMN.to_string(),
            barcode_keys: MatchPolicy::Exact,
            shop_keys: MatchPolicy::IgnoreCase,
        }
    }
}

impl SplitConfig {
    /// Overlays the given layers onto the built-in defaults. Later layers
    /// win field by field.
    pub fn resolve(layers: &[&ColumnSelection]) -> Self {
        let mut config = SplitConfig::default();
        for layer in layers {
            if let Some(name) = &layer.order_barcode_column {
                config.order_barcode_column = name.clone();
            }
            if let Some(name) = &layer.order_shop_column {
                config.order_shop_column = name.clone();
            }
            if let Some(name) = &layer.schedule_shop_column {
                config.schedule_shop_column = name.clone();
            }
            if let Some(name) = &layer.schedule_day_column {
                config.schedule_day_column = name.clone();
            }
            if let Some(policy) = layer.barcode_keys {
                config.barcode_keys = policy;
            }
            if let Some(policy) = layer.shop_keys {
                config.shop_keys = policy;
            }
        }
        config
    }

    /// Checks everything the barcode remap stage needs.
    pub fn validate_remap(&self, order: &Dataset, mapping: &Dataset) -> Result<(), ConfigError> {
        order.require_column("order", &self.order_barcode_column)?;
        if mapping.column_count() < MAPPING_REQUIRED_COLUMNS {
            return Err(ConfigError::NotEnoughColumns {
                dataset: "mapping",
                required: MAPPING_REQUIRED_COLUMNS,
                found: mapping.column_count(),
            });
        }
        Ok(())
    }

    /// Checks the full column selection against all three datasets. Runs
    /// before any row is touched so a failure never leaves partial output.
    pub fn validate(
        &self,
        order: &Dataset,
        mapping: &Dataset,
        schedule: &Dataset,
    ) -> Result<(), ConfigError> {
        self.validate_remap(order, mapping)?;
        order.require_column("order", &self.order_shop_column)?;
        schedule.require_column("schedule", &self.schedule_shop_column)?;
        schedule.require_column("schedule", &self.schedule_day_column)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    fn order() -> Dataset {
        Dataset::from_rows(
            vec!["Код EAN/UPC".into(), "Завод".into()],
            vec![vec!["123".into(), "A".into()]],
        )
    }

    fn mapping() -> Dataset {
        Dataset::from_rows(
            vec!["new".into(), "old".into()],
            vec![vec!["X1".into(), "123".into()]],
        )
    }

    fn schedule() -> Dataset {
        Dataset::from_rows(
            vec!["shop_code".into(), "allowed_weekday".into()],
            vec![vec!["A".into(), "Monday".into()]],
        )
    }

    #[test]
    fn resolve_overlays_layers_in_order() {
        let file = ColumnSelection {
            order_barcode_column: Some("ean".into()),
            shop_keys: Some(MatchPolicy::Exact),
            ..ColumnSelection::default()
        };
        let flags = ColumnSelection {
            order_barcode_column: Some("barcode".into()),
            ..ColumnSelection::default()
        };
        let config = SplitConfig::resolve(&[&file, &flags]);
        assert_eq!(config.order_barcode_column, "barcode");
        assert_eq!(config.order_shop_column, DEFAULT_ORDER_SHOP_COLUMN);
        assert_eq!(config.shop_keys, MatchPolicy::Exact);
        assert_eq!(config.barcode_keys, MatchPolicy::Exact);
    }

    #[test]
    fn validate_names_the_missing_column_and_dataset() {
        let config = SplitConfig {
            schedule_day_column: "weekday".into(),
            ..SplitConfig::default()
        };
        let err = config
            .validate(&order(), &mapping(), &schedule())
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingColumn {
                dataset: "schedule",
                column: "weekday".into(),
            }
        );
        assert!(err.to_string().contains("'weekday'"));
        assert!(err.to_string().contains("schedule dataset"));
    }

    #[test]
    fn validate_rejects_narrow_mapping() {
        let narrow = Dataset::from_rows(vec!["old".into()], vec![vec!["123".into()]]);
        let err = SplitConfig::default()
            .validate(&order(), &narrow, &schedule())
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NotEnoughColumns {
                dataset: "mapping",
                required: 2,
                found: 1,
            }
        ));
    }

    #[test]
    fn match_policy_normalizes_keys() {
        assert_eq!(MatchPolicy::Exact.normalize("  A12 "), "A12");
        assert_eq!(MatchPolicy::IgnoreCase.normalize(" Shop-7 "), "shop-7");
        assert_eq!(MatchPolicy::Exact.normalize("ШК"), "ШК");
        assert_eq!(MatchPolicy::IgnoreCase.normalize("ШК"), "шк");
    }
}
