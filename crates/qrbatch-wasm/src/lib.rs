//! QR Batch WASM - WebAssembly bindings for QR Batch
//!
//! This crate exposes the qrbatch-core pipeline to the browser page that
//! handles uploads, progress display and the archive download.
//!
//! # Module Structure
//!
//! - `table` - Upload parsing (CSV, TSV, XLSX) and preview
//! - `batch` - Batch generation with progress callbacks
//! - `types` - WASM-compatible wrapper types for tables and results
//!
//! # Usage
//!
//! ```typescript
//! import init, { read_table, generate_batch } from '@qrbatch/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const table = read_table(bytes, file.name, true);
//! const result = generate_batch(table, undefined, undefined, undefined);
//! console.log(`${result.succeeded}/${result.total} QR codes created`);
//! ```

use wasm_bindgen::prelude::*;

mod batch;
mod table;
mod types;

// Re-export public types
pub use batch::{generate_batch, generate_from_columns};
pub use table::read_table;
pub use types::{JsBatchResult, JsTable};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
