//! WASM-compatible wrapper types for tables and batch results.
//!
//! These types keep the core data in WASM memory and hand JavaScript plain
//! objects (via `serde-wasm-bindgen`) or byte arrays on request.

use qrbatch_core::pipeline::BatchOutput;
use qrbatch_core::render::CaptionFontKind;
use qrbatch_core::table::Table;
use qrbatch_core::{archive, InputRow};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Rows shown in the upload preview.
pub(crate) const PREVIEW_ROWS: usize = 5;

pub(crate) fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// A parsed upload, ready to preview and process.
#[wasm_bindgen]
pub struct JsTable {
    table: Table,
}

#[wasm_bindgen]
impl JsTable {
    /// Number of data rows (header excluded)
    #[wasm_bindgen(getter)]
    pub fn row_count(&self) -> usize {
        self.table.len()
    }

    /// Number of columns in the widest row
    #[wasm_bindgen(getter)]
    pub fn column_count(&self) -> usize {
        self.table.column_count
    }

    /// Whether the table has the label and URL columns
    #[wasm_bindgen(getter)]
    pub fn has_required_columns(&self) -> bool {
        self.table.ensure_columns().is_ok()
    }

    /// Names of the label and URL columns as `{ label, target }`.
    pub fn column_mapping(&self) -> Result<JsValue, JsValue> {
        let mapping = self
            .table
            .column_mapping()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        to_js(&mapping)
    }

    /// Header names, or `null` when the upload had no header row.
    pub fn headers(&self) -> Result<JsValue, JsValue> {
        to_js(&self.table.headers)
    }

    /// The first few data rows as arrays of strings or nulls.
    pub fn preview(&self) -> Result<JsValue, JsValue> {
        to_js(self.table.preview(PREVIEW_ROWS))
    }
}

impl JsTable {
    pub(crate) fn from_table(table: Table) -> Self {
        Self { table }
    }

    pub(crate) fn table(&self) -> &Table {
        &self.table
    }
}

/// Artifacts and summary of one batch run.
///
/// The JPEGs stay in WASM memory; `archive()` builds the ZIP on demand.
#[wasm_bindgen]
pub struct JsBatchResult {
    output: BatchOutput,
    font: CaptionFontKind,
}

#[wasm_bindgen]
impl JsBatchResult {
    #[wasm_bindgen(getter)]
    pub fn total(&self) -> usize {
        self.output.summary.total
    }

    #[wasm_bindgen(getter)]
    pub fn succeeded(&self) -> usize {
        self.output.summary.succeeded
    }

    #[wasm_bindgen(getter)]
    pub fn failed(&self) -> usize {
        self.output.summary.failed
    }

    /// Whether there is anything to download
    #[wasm_bindgen(getter)]
    pub fn has_output(&self) -> bool {
        !self.output.artifacts.is_empty()
    }

    /// Artifact names in row order
    pub fn artifact_names(&self) -> Vec<String> {
        self.output.artifacts.names().map(str::to_string).collect()
    }

    /// Summary as `{ total, succeeded, failed, failures }`.
    pub fn summary(&self) -> Result<JsValue, JsValue> {
        to_js(&self.output.summary)
    }

    /// Plain-text summary report
    pub fn summary_text(&self) -> String {
        self.output.summary.to_string()
    }

    /// Per-row outcomes in row order.
    pub fn outcomes(&self) -> Result<JsValue, JsValue> {
        to_js(&self.output.outcomes)
    }

    /// Which caption font was used.
    pub fn caption_font(&self) -> Result<JsValue, JsValue> {
        to_js(&self.font)
    }

    /// JPEG bytes of one artifact, if it exists.
    pub fn artifact_jpeg(&self, name: &str) -> Option<Vec<u8>> {
        self.output.artifacts.get(name).map(|a| a.jpeg.clone())
    }

    /// ZIP archive of all artifacts.
    ///
    /// Throws "No QR codes were generated" when there is nothing to download.
    pub fn archive(&self) -> Result<Vec<u8>, JsValue> {
        archive::package(&self.output.artifacts).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl JsBatchResult {
    pub(crate) fn new(output: BatchOutput, font: CaptionFontKind) -> Self {
        Self { output, font }
    }

    #[cfg(test)]
    pub(crate) fn output(&self) -> &BatchOutput {
        &self.output
    }
}

/// Zip two columns into input rows; targets past the end become absent.
///
/// Blank targets are kept as given so failures report the cell text.
pub(crate) fn rows_from_columns(labels: Vec<String>, targets: Vec<String>) -> Vec<InputRow> {
    let mut targets = targets.into_iter();
    labels
        .into_iter()
        .map(|label| InputRow {
            label,
            target: targets.next(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrbatch_core::table::{read_table, ReadOptions, TableFormat};
    use qrbatch_core::BatchProcessor;

    fn small_result(rows: &[InputRow]) -> JsBatchResult {
        let mut opts = qrbatch_core::RenderOptions::default();
        opts.size = 64;
        opts.caption_height = 16;
        let processor = BatchProcessor::new(opts);
        JsBatchResult::new(processor.process(rows), processor.font_kind())
    }

    #[test]
    fn test_js_table_getters() {
        let table = read_table(
            b"Name,URL\nA,https://a\nB,https://b\n",
            TableFormat::Csv,
            ReadOptions::default(),
        )
        .unwrap();
        let js = JsTable::from_table(table);
        assert_eq!(js.row_count(), 2);
        assert_eq!(js.column_count(), 2);
        assert!(js.has_required_columns());
    }

    #[test]
    fn test_js_table_single_column() {
        let table = read_table(b"Name\nA\n", TableFormat::Csv, ReadOptions::default()).unwrap();
        assert!(!JsTable::from_table(table).has_required_columns());
    }

    #[test]
    fn test_batch_result_getters() {
        let rows = vec![
            InputRow::new("Store A", "https://a.example"),
            InputRow::new("Store A", "https://b.example"),
            InputRow::new("Kiosk", ""),
        ];
        let result = small_result(&rows);
        assert_eq!(result.total(), 3);
        assert_eq!(result.succeeded(), 2);
        assert_eq!(result.failed(), 1);
        assert!(result.has_output());
        assert_eq!(result.artifact_names(), vec!["Store A", "Store A_1"]);
        assert!(result.artifact_jpeg("Store A_1").is_some());
        assert!(result.artifact_jpeg("Kiosk").is_none());
        assert!(result.summary_text().contains("Kiosk: empty target"));
    }

    #[test]
    fn test_batch_result_empty() {
        let result = small_result(&[]);
        assert!(!result.has_output());
        assert!(result.output().artifacts.is_empty());
    }

    #[test]
    fn test_rows_from_columns() {
        let rows = rows_from_columns(
            vec!["A".into(), "B".into(), "C".into()],
            vec!["https://a".into(), "  ".into()],
        );
        assert_eq!(rows[0], InputRow::new("A", "https://a"));
        assert_eq!(rows[1], InputRow::new("B", "  "));
        assert_eq!(rows[2], InputRow::without_target("C"));
    }

    #[test]
    fn test_blank_column_target_keeps_raw_text() {
        let rows = rows_from_columns(vec!["Kiosk".into()], vec!["  ".into()]);
        let result = small_result(&rows);
        assert_eq!(result.failed(), 1);
        let failure = &result.output().summary.failures[0];
        assert_eq!(failure.target, "  ");
        assert_eq!(failure.reason.to_string(), "empty target");
    }
}
