//! Upload parsing WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { read_table } from '@qrbatch/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const table = read_table(bytes, file.name, true);
//! if (!table.has_required_columns) {
//!   throw new Error('Need a label column and a URL column');
//! }
//! const { label, target } = table.column_mapping();
//! console.log(`Using '${label}' for filenames and '${target}' for URLs`);
//! ```

use crate::types::JsTable;
use qrbatch_core::table::{self, ReadOptions};
use wasm_bindgen::prelude::*;

/// Parse an uploaded CSV, TSV or XLSX file.
///
/// The format is detected from the file contents and name. When
/// `has_header` is true the first row names the columns.
///
/// # Errors
///
/// Returns an error if the file is empty or the workbook cannot be read.
/// A table with too few columns is returned successfully; check
/// `has_required_columns` before processing.
#[wasm_bindgen]
pub fn read_table(bytes: &[u8], file_name: &str, has_header: bool) -> Result<JsTable, JsValue> {
    table::read_upload(file_name, bytes, ReadOptions { has_header })
        .map(JsTable::from_table)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
