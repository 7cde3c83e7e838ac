//! Shop schedule lookup and the weekday split stage.
//!
//! The schedule maps shop keys to a delivery weekday. A shop whose weekday
//! cell is unrecognized is remembered as invalid, distinct from a shop the
//! schedule never mentions; both route an order row to `Unassigned`.
//! Any date columns in the order itself are deliberately never consulted:
//! the schedule is authoritative.

use std::collections::HashMap;

use log::debug;

use crate::{
    config::{ConfigError, MatchPolicy, SplitConfig},
    dataset::Dataset,
    pipeline::Buckets,
    weekday::{Bucket, Weekday},
};

#[derive(Debug)]
pub struct ScheduleLookup {
    /// `None` marks a shop whose weekday text did not parse.
    entries: HashMap<String, Option<Weekday>>,
    policy: MatchPolicy,
}

impl ScheduleLookup {
    /// Builds the shop → weekday lookup. Duplicate shop keys follow the
    /// same last-row-wins tie-break as the barcode mapping.
    pub fn build(schedule: &Dataset, config: &SplitConfig) -> Result<Self, ConfigError> {
        let shop_column = schedule.require_column("schedule", &config.schedule_shop_column)?;
        let day_column = schedule.require_column("schedule", &config.schedule_day_column)?;
        let policy = config.shop_keys;
        let mut entries = HashMap::new();
        let mut invalid = 0usize;
        for row in &schedule.rows {
            let shop = row.get(shop_column).map(String::as_str).unwrap_or("");
            let day = Weekday::parse(row.get(day_column).map(String::as_str).unwrap_or(""));
            if day.is_none() {
                invalid += 1;
            }
            entries.insert(policy.normalize(shop).into_owned(), day);
        }
        if invalid > 0 {
            debug!("{invalid} schedule row(s) carry unrecognized weekday text");
        }
        Ok(Self { entries, policy })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The bucket an order row with this shop cell belongs to.
    pub fn bucket_for(&self, shop: &str) -> Bucket {
        match self.entries.get(self.policy.normalize(shop).as_ref()) {
            Some(Some(day)) => Bucket::Day(*day),
            Some(None) | None => Bucket::Unassigned,
        }
    }
}

/// The full split stage: validate, build the lookup, partition every order
/// row into exactly one bucket. Rows keep their relative input order.
pub fn split_by_weekday(
    order: &Dataset,
    schedule: &Dataset,
    config: &SplitConfig,
) -> Result<Buckets, ConfigError> {
    let shop_column = order.require_column("order", &config.order_shop_column)?;
    let lookup = ScheduleLookup::build(schedule, config)?;
    debug!(
        "Schedule lookup holds {} shop(s) ({:?} keys)",
        lookup.len(),
        config.shop_keys
    );
    let mut buckets = Buckets::empty(order.headers.clone());
    for row in &order.rows {
        let shop = row.get(shop_column).map(String::as_str).unwrap_or("");
        buckets.push(lookup.bucket_for(shop), row.clone());
    }
    Ok(buckets)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule(rows: &[(&str, &str)]) -> Dataset {
        Dataset::from_rows(
            vec!["shop_code".into(), "allowed_weekday".into()],
            rows.iter()
                .map(|(shop, day)| vec![shop.to_string(), day.to_string()])
                .collect(),
        )
    }

    fn order(shops: &[&str]) -> Dataset {
        Dataset::from_rows(
            vec!["Код EAN/UPC".into(), "Завод".into()],
            shops
                .iter()
                .enumerate()
                .map(|(idx, shop)| vec![format!("bc-{idx}"), shop.to_string()])
                .collect(),
        )
    }

    #[test]
    fn unknown_shops_and_invalid_weekdays_go_to_unassigned() {
        let lookup = ScheduleLookup::build(
            &schedule(&[("A", "Monday"), ("B", "Someday")]),
            &SplitConfig::default(),
        )
        .unwrap();
        assert_eq!(lookup.bucket_for("A"), Bucket::Day(Weekday::Monday));
        assert_eq!(lookup.bucket_for("B"), Bucket::Unassigned);
        assert_eq!(lookup.bucket_for("C"), Bucket::Unassigned);
    }

    #[test]
    fn shop_keys_are_case_insensitive_and_trimmed_by_default() {
        let lookup =
            ScheduleLookup::build(&schedule(&[(" Shop-1 ", "2")]), &SplitConfig::default())
                .unwrap();
        assert_eq!(lookup.bucket_for("shop-1"), Bucket::Day(Weekday::Tuesday));
        assert_eq!(lookup.bucket_for("SHOP-1  "), Bucket::Day(Weekday::Tuesday));

        let exact_config = SplitConfig {
            shop_keys: MatchPolicy::Exact,
            ..SplitConfig::default()
        };
        let exact = ScheduleLookup::build(&schedule(&[("Shop-1", "2")]), &exact_config).unwrap();
        assert_eq!(exact.bucket_for("shop-1"), Bucket::Unassigned);
        assert_eq!(exact.bucket_for("Shop-1"), Bucket::Day(Weekday::Tuesday));
    }

    #[test]
    fn later_schedule_rows_win_on_duplicate_shops() {
        let lookup = ScheduleLookup::build(
            &schedule(&[("A", "Monday"), ("A", "Friday")]),
            &SplitConfig::default(),
        )
        .unwrap();
        assert_eq!(lookup.bucket_for("A"), Bucket::Day(Weekday::Friday));
        assert_eq!(lookup.len(), 1);
    }

    #[test]
    fn partition_is_stable_within_each_bucket() {
        let buckets = split_by_weekday(
            &order(&["A", "B", "A", "C", "A"]),
            &schedule(&[("A", "Monday"), ("B", "Monday")]),
            &SplitConfig::default(),
        )
        .unwrap();
        let monday = buckets.get(Bucket::Day(Weekday::Monday));
        let barcodes: Vec<&str> = monday.rows.iter().map(|row| row[0].as_str()).collect();
        assert_eq!(barcodes, ["bc-0", "bc-1", "bc-2", "bc-4"]);
        let unassigned = buckets.get(Bucket::Unassigned);
        assert_eq!(unassigned.rows.len(), 1);
        assert_eq!(unassigned.rows[0][0], "bc-3");
    }

    #[test]
    fn missing_schedule_columns_are_configuration_errors() {
        let bad = Dataset::from_rows(vec!["shop_code".into()], vec![vec!["A".into()]]);
        let err = split_by_weekday(&order(&["A"]), &bad, &SplitConfig::default()).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingColumn {
                dataset: "schedule",
                column: "allowed_weekday".into(),
            }
        );
    }
}
