//! The split command: full pipeline plus file delivery.
//!
//! The core produces all six buckets; this module handles everything the
//! core deliberately does not: export shaping (column drops, first-column
//! rotation), file naming, and writing one CSV per bucket.

use std::fs;

use anyhow::{Context, Result};
use chrono::Local;
use log::{info, warn};

use crate::{
    cli::SplitArgs,
    config::{ColumnSelection, SplitConfig},
    dataset::{self, Dataset},
    io_utils, pipeline, summary, table,
    weekday::Bucket,
};

pub fn execute(args: &SplitArgs) -> Result<()> {
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
    info!(
        "Splitting '{}' ({} row(s), delimiter '{}') into {:?}",
        args.order.display(),
        order.row_count(),
        crate::printable_delimiter(order_delimiter),
        args.out_dir
    );

    let buckets = pipeline::run(&order, &mapping, &schedule, &config)?;

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Creating output directory {:?}", args.out_dir))?;
    let output_delimiter =
        io_utils::resolve_output_delimiter(None, args.output_delimiter, order_delimiter);
    let datestamp = args
        .datestamp
        .then(|| Local::now().format("%Y-%m-%d").to_string());

    let mut written = 0usize;
    for (bucket, rows) in buckets.iter() {
        if rows.is_empty() && !args.write_empty {
            continue;
        }
        let shaped = shape_for_export(rows, &args.drop_columns, args.rotate_first_column);
        let file_name = bucket_file_name(
            bucket,
            &args.prefix,
            datestamp.as_deref(),
            args.georgian_days,
        );
        let path = args.out_dir.join(&file_name);
        dataset::write_dataset(&shaped, Some(&path), output_delimiter)
            .with_context(|| format!("Writing bucket '{}'", bucket.name()))?;
        info!("{}: {} row(s) -> {:?}", bucket.name(), shaped.row_count(), path);
        written += 1;
    }

    let unassigned = buckets.get(Bucket::Unassigned);
    if !unassigned.is_empty() {
        warn!(
            "{} row(s) have no weekday in the schedule; kept in '{}'",
            unassigned.row_count(),
            Bucket::Unassigned.name()
        );
    }
    if args.table {
        table::print_table(&summary::summary_headers(), &summary::summary_rows(&buckets));
    }
    info!(
        "Split complete: {} row(s) across {} file(s)",
        buckets.total_rows(),
        written
    );
    Ok(())
}

fn resolve_config(args: &SplitArgs) -> Result<SplitConfig> {
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

/// Export shaping recovered from the delivery rules: drop the named columns
/// when present, then optionally move the first column to the last
/// position. The core pipeline output is never shaped, only files are.
fn shape_for_export(bucket: &Dataset, drop_columns: &[String], rotate_first: bool) -> Dataset {
    let keep: Vec<usize> = bucket
        .headers
        .iter()
        .enumerate()
        .filter(|(_, name)| !drop_columns.iter().any(|dropped| dropped == *name))
        .map(|(idx, _)| idx)
        .collect();

    let mut headers: Vec<String> = keep.iter().map(|&idx| bucket.headers[idx].clone()).collect();
    let mut rows: Vec<Vec<String>> = bucket
        .rows
        .iter()
        .map(|row| {
            keep.iter()
                .map(|&idx| row.get(idx).cloned().unwrap_or_default())
                .collect()
        })
        .collect();

    if rotate_first && headers.len() > 1 {
        headers.rotate_left(1);
        for row in &mut rows {
            row.rotate_left(1);
        }
    }
    Dataset::from_rows(headers, rows)
}

fn bucket_file_name(
    bucket: Bucket,
    prefix: &str,
    datestamp: Option<&str>,
    georgian_days: bool,
) -> String {
    let day = if georgian_days {
        bucket.georgian().to_string()
    } else {
        bucket.name().to_lowercase()
    };
    match datestamp {
        Some(date) => format!("{prefix}{day}-{date}.csv"),
        None => format!("{prefix}{day}.csv"),
    }
}
