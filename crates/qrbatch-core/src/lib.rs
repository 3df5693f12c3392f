//! QR Batch Core - batch QR-code generation library
//!
//! This crate turns spreadsheet rows (a label and a URL each) into labeled
//! QR-code JPEGs, tracks per-row success and failure, and packages the
//! results into a single ZIP archive. Everything happens in memory for the
//! duration of one call.
//!
//! # Pipeline
//!
//! - [`table`] - read CSV/TSV/XLSX uploads into ordered rows
//! - [`label`] - clean labels into safe names and captions
//! - [`render`] - encode, rasterize and caption QR codes
//! - [`encode`] - JPEG encoding
//! - [`pipeline`] - per-row processing, naming and failure accounting
//! - [`archive`] - ZIP packaging

pub mod archive;
pub mod encode;
pub mod label;
pub mod pipeline;
pub mod render;
pub mod table;

pub use archive::{entry_names, package, PackageError};
pub use pipeline::{
    process, Artifact, ArtifactSet, BatchOutput, BatchProcessor, FailureReason, FailureRecord,
    Progress, RowOutcome, RunSummary,
};
pub use render::{RenderError, RenderOptions};
pub use table::{read_table, read_upload, InputError, InputRow, ReadOptions, Table, TableFormat};
