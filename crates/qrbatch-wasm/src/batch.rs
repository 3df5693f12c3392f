//! Batch generation WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { read_table, generate_batch } from '@qrbatch/wasm';
//!
//! const table = read_table(bytes, file.name, true);
//! const result = generate_batch(table, { jpegQuality: 95 }, [fontBytes], (outcome, progress) => {
//!   bar.value = progress.completed / progress.total;
//!   if (outcome.status === 'failed') console.warn(outcome.label, outcome.reason);
//! });
//!
//! console.log(result.summary_text());
//! if (result.has_output) {
//!   const zip = result.archive();
//!   download(new Blob([zip], { type: 'application/zip' }), 'qr_codes.zip');
//! }
//! ```

use crate::types::{rows_from_columns, to_js, JsBatchResult, JsTable};
use qrbatch_core::{BatchProcessor, InputRow, RenderOptions};
use wasm_bindgen::prelude::*;

/// Parse render options from a JS object; `undefined`/`null` means defaults.
fn options_from_js(options: JsValue) -> Result<RenderOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(RenderOptions::default());
    }
    serde_wasm_bindgen::from_value(options).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Collect candidate font files from a JS array of `Uint8Array`s.
fn fonts_from_js(fonts: Option<js_sys::Array>) -> Vec<Vec<u8>> {
    fonts
        .map(|array| {
            array
                .iter()
                .map(|value| js_sys::Uint8Array::new(&value).to_vec())
                .collect()
        })
        .unwrap_or_default()
}

fn run(
    rows: &[InputRow],
    options: JsValue,
    fonts: Option<js_sys::Array>,
    on_progress: Option<js_sys::Function>,
) -> Result<JsBatchResult, JsValue> {
    let options = options_from_js(options)?;
    let processor = BatchProcessor::with_fonts(options, &fonts_from_js(fonts));

    let output = processor.process_with_progress(rows, |outcome, progress| {
        let Some(callback) = on_progress.as_ref() else {
            return;
        };
        let args = to_js(outcome).and_then(|o| to_js(&progress).map(|p| (o, p)));
        let result = args.and_then(|(o, p)| callback.call2(&JsValue::NULL, &o, &p));
        if let Err(e) = result {
            web_sys::console::warn_2(&JsValue::from_str("progress callback failed:"), &e);
        }
    });

    Ok(JsBatchResult::new(output, processor.font_kind()))
}

/// Generate QR codes for every row of a parsed table.
///
/// # Arguments
///
/// * `table` - Table returned by `read_table`
/// * `options` - Partial render options (`size`, `jpegQuality`, `caption`, ...), or `undefined`
/// * `fonts` - Candidate caption fonts (TTF/OTF bytes) in preference order, or `undefined`
/// * `on_progress` - Called after each row with `(outcome, { completed, total })`
///
/// # Errors
///
/// Returns an error if the table has fewer than two columns or the options
/// are malformed. Individual row failures are reported in the result.
#[wasm_bindgen]
pub fn generate_batch(
    table: &JsTable,
    options: JsValue,
    fonts: Option<js_sys::Array>,
    on_progress: Option<js_sys::Function>,
) -> Result<JsBatchResult, JsValue> {
    let rows = table
        .table()
        .input_rows()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    run(&rows, options, fonts, on_progress)
}

/// Generate QR codes from two parallel columns of strings.
///
/// Useful when the page already holds the rows (e.g. from a text area).
/// Labels without a matching target are reported as empty targets.
#[wasm_bindgen]
pub fn generate_from_columns(
    labels: Vec<String>,
    targets: Vec<String>,
    options: JsValue,
) -> Result<JsBatchResult, JsValue> {
    let rows = rows_from_columns(labels, targets);
    run(&rows, options, None, None)
}
