//! Tabular input for QR Batch.
//!
//! This module provides functionality for:
//! - Reading CSV and TSV uploads
//! - Reading the first worksheet of an XLSX workbook
//! - Projecting the first two columns into ordered [`InputRow`]s
//!
//! Column positions, not names, decide meaning: the first column is the
//! label and the second the target. Tables with fewer than two columns are
//! rejected before any row is processed.
//!
//! # Examples
//!
//! ```ignore
//! use qrbatch_core::table::{read_table, ReadOptions, TableFormat};
//!
//! let bytes = std::fs::read("stores.xlsx").unwrap();
//! let format = TableFormat::detect("stores.xlsx", &bytes);
//! let table = read_table(&bytes, format, ReadOptions::default()).unwrap();
//! let rows = table.input_rows().unwrap();
//! ```

mod csv;
mod types;
mod xlsx;

pub use types::{ColumnMapping, InputError, InputRow, ReadOptions, Table, TableFormat};

use csv::Delimiter;

/// Parse uploaded bytes in the given format.
pub fn read_table(data: &[u8], format: TableFormat, options: ReadOptions) -> Result<Table, InputError> {
    if data.is_empty() {
        return Err(InputError::EmptyFile);
    }
    let table = match format {
        TableFormat::Csv => csv::parse_delimited(data, Delimiter::Comma, options),
        TableFormat::Tsv => csv::parse_delimited(data, Delimiter::Tab, options),
        TableFormat::Xlsx => xlsx::parse_xlsx(data, options)?,
    };
    tracing::debug!(
        ?format,
        rows = table.len(),
        columns = table.column_count,
        "read input table"
    );
    Ok(table)
}

/// Detect the format from the file name and contents, then parse.
pub fn read_upload(file_name: &str, data: &[u8], options: ReadOptions) -> Result<Table, InputError> {
    read_table(data, TableFormat::detect(file_name, data), options)
}
