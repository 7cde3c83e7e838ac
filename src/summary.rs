//! Dry-run summary: run the pipeline, print bucket counts, write nothing.

use anyhow::Result;
use log::info;

use crate::{
    cli::SummaryArgs,
    config::{ColumnSelection, SplitConfig},
    dataset, io_utils,
    pipeline::{self, Buckets},
    table,
};

pub fn execute(args: &SummaryArgs) -> Result<()> {
    let order_delimiter = io_utils::resolve_input_delimiter(&args.order, args.delimiter);
    let mapping_delimiter = io_utils::resolve_input_delimiter(&args.mapping, args.delimiter);
    let schedule_delimiter = io_utils::resolve_input_delimiter(&args.schedule, args.delimiter);
    let order_encoding = io_utils::resolve_encoding(args.order_encoding.as_deref())?;
    let mapping_encoding = io_utils::resolve_encoding(args.mapping_encoding.as_deref())?;
    let schedule_encoding = io_utils::resolve_encoding(args.schedule_encoding.as_deref())?;

    let order = dataset::read_dataset(&args.order, "order", order_delimiter, order_encoding)?;
    let mapping =
        dataset::read_dataset(&args.mapping, "mapping", mapping_delimiter, mapping_encoding)?;
    let schedule = dataset::read_dataset(
        &args.schedule,
        "schedule",
        schedule_delimiter,
        schedule_encoding,
    )?;

    let config = resolve_config(args)?;
    let buckets = pipeline::run(&order, &mapping, &schedule, &config)?;

    table::print_table(&summary_headers(), &summary_rows(&buckets));
    info!(
        "Summarized {} row(s) from {:?}",
        buckets.total_rows(),
        args.order
    );
    Ok(())
}

fn resolve_config(args: &SummaryArgs) -> Result<SplitConfig> {
    let file = match &args.columns_file {
        Some(path) => Some(ColumnSelection::load(path)?),
        None => None,
    };
    let flags = ColumnSelection {
        order_barcode_column: args.barcode_column.clone(),
        order_shop_column: args.shop_column.clone(),
        schedule_shop_column: args.schedule_shop_column.clone(),
        schedule_day_column: args.schedule_day_column.clone(),
        barcode_keys: args.barcode_match,
        shop_keys: args.shop_match,
    };
    let mut layers: Vec<&ColumnSelection> = Vec::new();
    if let Some(file) = &file {
        layers.push(file);
    }
    layers.push(&flags);
    Ok(SplitConfig::resolve(&layers))
}

pub fn summary_headers() -> Vec<String> {
    vec!["bucket".to_string(), "rows".to_string(), "share".to_string()]
}

pub fn summary_rows(buckets: &Buckets) -> Vec<Vec<String>> {
    let total = buckets.total_rows();
    buckets
        .iter()
        .map(|(bucket, table)| {
            let share = if total == 0 {
                0.0
            } else {
                (table.row_count() as f64 / total as f64) * 100.0
            };
            vec![
                bucket.name().to_string(),
                table.row_count().to_string(),
                format!("{share:.2}%"),
            ]
        })
        .collect()
}
