//! Image encoding for generated artifacts.
//!
//! This module provides functionality for:
//! - Encoding rendered QR images to JPEG format with configurable quality
//!
//! All operations are synchronous and single-threaded; the output bytes are
//! kept in memory until the archive is packaged.

mod jpeg;

pub use jpeg::{encode_jpeg, EncodeError, DEFAULT_JPEG_QUALITY};
