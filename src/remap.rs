//! Standalone barcode remap command: apply the mapping, write one CSV.

use anyhow::{Context, Result};
use log::info;

use crate::{
    barcode,
    cli::RemapArgs,
    config::{ColumnSelection, SplitConfig},
    dataset, io_utils,
};

pub fn execute(args: &RemapArgs) -> Result<()> {
    let order_delimiter = io_utils::resolve_input_delimiter(&args.order, args.delimiter);
    let mapping_delimiter = io_utils::resolve_input_delimiter(&args.mapping, args.delimiter);
    let order_encoding = io_utils::resolve_encoding(args.order_encoding.as_deref())?;
    let mapping_encoding = io_utils::resolve_encoding(args.mapping_encoding.as_deref())?;

    let order = dataset::read_dataset(&args.order, "order", order_delimiter, order_encoding)?;
    let mapping =
        dataset::read_dataset(&args.mapping, "mapping", mapping_delimiter, mapping_encoding)?;

    let config = resolve_config(args)?;
    info!(
        "Remapping column '{}' of '{}' ({} row(s), delimiter '{}')",
        config.order_barcode_column,
        args.order.display(),
        order.row_count(),
        crate::printable_delimiter(order_delimiter)
    );

    let remapped = barcode::remap_barcodes(&order, &mapping, &config)?;

    let output_delimiter = io_utils::resolve_output_delimiter(
        args.output.as_deref(),
        args.output_delimiter,
        order_delimiter,
    );
    dataset::write_dataset(&remapped, args.output.as_deref(), output_delimiter)
        .context("Writing remapped order")?;

    let destination = args
        .output
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "stdout".to_string());
    info!(
        "Remapped {} row(s) using {} mapping row(s) -> {}",
        remapped.row_count(),
        mapping.row_count(),
        destination
    );
    Ok(())
}

fn resolve_config(args: &RemapArgs) -> Result<SplitConfig> {
    let file = match &args.columns_file {
        Some(path) => Some(ColumnSelection::load(path)?),
        None => None,
    };
    let flags = ColumnSelection {
        order_barcode_column: args.barcode_column.clone(),
        barcode_keys: args.barcode_match,
        ..ColumnSelection::default()
    };
    let mut layers: Vec<&ColumnSelection> = Vec::new();
    if let Some(file) = &file {
        layers.push(file);
    }
    layers.push(&flags);
    Ok(SplitConfig::resolve(&layers))
}
