//! Barcode remap stage.
//!
//! The mapping dataset carries the replacement value in its first column and
//! the value to replace in its second, regardless of header text. The lookup
//! is built once per run; order rows whose barcode has no entry pass through
//! unchanged, which is the expected case rather than an error.

use std::collections::HashMap;

use log::debug;

use crate::{
    config::{ConfigError, MAPPING_REQUIRED_COLUMNS, MatchPolicy, SplitConfig},
    dataset::Dataset,
};

/// Mapping dataset column positions: new value first, old value second.
pub const MAPPING_NEW_COLUMN: usize = 0;
pub const MAPPING_OLD_COLUMN: usize = 1;

#[derive(Debug)]
pub struct BarcodeLookup {
    entries: HashMap<String, String>,
    policy: MatchPolicy,
}

impl BarcodeLookup {
    /// Builds the old-value → new-value lookup from the mapping dataset.
    /// When the same old value appears in several rows, the last row wins.
    pub fn build(mapping: &Dataset, policy: MatchPolicy) -> Result<Self, ConfigError> {
        if mapping.column_count() < MAPPING_REQUIRED_COLUMNS {
            return Err(ConfigError::NotEnoughColumns {
                dataset: "mapping",
                required: MAPPING_REQUIRED_COLUMNS,
                found: mapping.column_count(),
            });
        }
        let mut entries = HashMap::new();
        for row in &mapping.rows {
            let old = row.get(MAPPING_OLD_COLUMN).map(String::as_str).unwrap_or("");
            let key = policy.normalize(old);
            if key.is_empty() {
                continue;
            }
            let new = row.get(MAPPING_NEW_COLUMN).cloned().unwrap_or_default();
            entries.insert(key.into_owned(), new);
        }
        Ok(Self { entries, policy })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The replacement for this barcode cell, if one is mapped. Blank cells
    /// never match.
    pub fn resolve(&self, raw: &str) -> Option<&str> {
        let key = self.policy.normalize(raw);
        if key.is_empty() {
            return None;
        }
        self.entries.get(key.as_ref()).map(String::as_str)
    }

    /// Produces a copy of the order dataset with the barcode column
    /// rewritten through this lookup. The input is left untouched.
    pub fn apply(&self, order: &Dataset, barcode_column: usize) -> Dataset {
        let rows = order
            .rows
            .iter()
            .map(|row| {
                let mut rewritten = row.clone();
                if let Some(cell) = rewritten.get_mut(barcode_column)
                    && let Some(mapped) = self.resolve(cell)
                {
                    *cell = mapped.to_string();
                }
                rewritten
            })
            .collect();
        Dataset::from_rows(order.headers.clone(), rows)
    }
}

/// The full remap stage: validate, build the lookup, rewrite the barcode
/// column.
pub fn remap_barcodes(
    order: &Dataset,
    mapping: &Dataset,
    config: &SplitConfig,
) -> Result<Dataset, ConfigError> {
    let barcode_column = order.require_column("order", &config.order_barcode_column)?;
    let lookup = BarcodeLookup::build(mapping, config.barcode_keys)?;
    debug!(
        "Barcode lookup holds {} mapping(s) ({:?} keys)",
        lookup.len(),
        config.barcode_keys
    );
    Ok(lookup.apply(order, barcode_column))
}
