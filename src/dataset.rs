//! In-memory tabular dataset shared by every pipeline stage.
//!
//! A [`Dataset`] is an ordered header row plus data rows of matching arity.
//! The pipeline treats cells as text; whatever typing the source file had is
//! preserved verbatim and round-tripped back out. Row order is stable from
//! load to export.

use std::path::Path;

use anyhow::{Context, Result};
use encoding_rs::Encoding;
use itertools::Itertools;

use crate::{config::ConfigError, io_utils};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Dataset {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the column with exactly this header text, if any.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Like [`Dataset::column_index`] but failing with the dataset and
    /// column named in the error.
    pub fn require_column(&self, dataset: &'static str, name: &str) -> Result<usize, ConfigError> {
        self.column_index(name)
            .ok_or_else(|| ConfigError::MissingColumn {
                dataset,
                column: name.to_string(),
            })
    }

    /// Header names must be unique, otherwise a column selection would be
    /// ambiguous. Checked once at load time.
    pub fn check_unique_headers(&self, dataset: &'static str) -> Result<(), ConfigError> {
        match self.headers.iter().duplicates().next() {
            Some(duplicate) => Err(ConfigError::DuplicateColumn {
                dataset,
                column: duplicate.clone(),
            }),
            None => Ok(()),
        }
    }
}

/// Reads a whole CSV file into a [`Dataset`], decoding from the given
/// encoding. `dataset` labels the file in error messages ("order",
/// "mapping", "schedule").
pub fn read_dataset(
    path: &Path,
    dataset: &'static str,
    delimiter: u8,
    encoding: &'static Encoding,
) -> Result<Dataset> {
    let mut reader = io_utils::open_csv_reader_from_path(path, delimiter, true)?;
    let headers = io_utils::reader_headers(&mut reader, encoding)
        .with_context(|| format!("Reading headers of the {dataset} file {path:?}"))?;
    let mut table = Dataset::new(headers);
    table.check_unique_headers(dataset)?;
    for (row_idx, record) in reader.byte_records().enumerate() {
        let record = record
            .with_context(|| format!("Reading row {} of the {dataset} file", row_idx + 2))?;
        let decoded = io_utils::decode_record(&record, encoding)?;
        table.rows.push(decoded);
    }
    Ok(table)
}

/// Writes a [`Dataset`] as CSV to the given path, or stdout when the path
/// is `None` or `-`.
pub fn write_dataset(table: &Dataset, path: Option<&Path>, delimiter: u8) -> Result<()> {
    let mut writer = io_utils::open_csv_writer(path, delimiter)?;
    writer
        .write_record(table.headers.iter())
        .context("Writing output headers")?;
    for (row_idx, row) in table.rows.iter().enumerate() {
        writer
            .write_record(row.iter())
            .with_context(|| format!("Writing output row {}", row_idx + 2))?;
    }
    writer.flush().context("Flushing output writer")?;
    Ok(())
}
