//! Pipeline orchestration: barcode remap followed by the weekday split.
//!
//! Stateless: every run owns its inputs and configuration, so identical
//! inputs always produce identical buckets.

use crate::{
    barcode,
    config::{ConfigError, SplitConfig},
    dataset::Dataset,
    schedule,
    weekday::Bucket,
};

/// The pipeline output: one table per bucket, Monday through Friday then
/// Unassigned. All six are always present; empty buckets hold the order's
/// headers and no rows. The multiset of rows across all buckets equals the
/// input order rows; nothing is created, dropped, or duplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buckets {
    tables: Vec<Dataset>,
}

impl Buckets {
    pub fn empty(headers: Vec<String>) -> Self {
        Self {
            tables: Bucket::ALL
                .iter()
                .map(|_| Dataset::new(headers.clone()))
                .collect(),
        }
    }

    pub fn push(&mut self, bucket: Bucket, row: Vec<String>) {
        self.tables[bucket.index()].rows.push(row);
    }

    pub fn get(&self, bucket: Bucket) -> &Dataset {
        &self.tables[bucket.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Bucket, &Dataset)> {
        Bucket::ALL.into_iter().zip(self.tables.iter())
    }

    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(Dataset::row_count).sum()
    }
}

/// Runs the two stages in their fixed order. The whole column selection is
/// validated against all three datasets up front, so a configuration error
/// surfaces before any row is processed.
pub fn run(
    order: &Dataset,
    mapping: &Dataset,
    schedule_table: &Dataset,
    config: &SplitConfig,
) -> Result<Buckets, ConfigError> {
    config.validate(order, mapping, schedule_table)?;
    let remapped = barcode::remap_barcodes(order, mapping, config)?;
    schedule::split_by_weekday(&remapped, schedule_table, config)
}
