//! Core types for QR rendering.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::encode::{EncodeError, DEFAULT_JPEG_QUALITY};

/// Largest accepted output side or caption band, in pixels.
pub const MAX_DIMENSION: u32 = 4096;

/// Largest accepted module size before scaling, in pixels.
pub const MAX_MODULE_PX: u32 = 100;

/// Error types for rendering a single artifact.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The QR encoder rejected the data (e.g. too long for any version).
    #[error("QR encoding failed: {0}")]
    QrEncoding(String),

    /// The render options cannot produce an image.
    #[error("Invalid render options: {0}")]
    InvalidOptions(String),

    /// The rendered image could not be encoded as JPEG.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Filter type used when scaling the rasterized code to its output size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// Nearest neighbor interpolation (hard module edges).
    Nearest,
    /// Bilinear interpolation.
    Bilinear,
    /// Lanczos3 interpolation (smoothest edges).
    #[default]
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Settings for turning a target string into an artifact image.
///
/// Deserializes from a partial object; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderOptions {
    /// Pixels per QR module before scaling.
    pub module_px: u32,
    /// Quiet zone width in modules.
    pub border_modules: u32,
    /// Side length of the square QR image in pixels.
    pub size: u32,
    /// Filter used to scale the code to `size`.
    pub filter: FilterType,
    /// JPEG quality (1-100).
    pub jpeg_quality: u8,
    /// Draw the label beneath the code.
    pub caption: bool,
    /// Height of the caption band in pixels.
    pub caption_height: u32,
    /// Caption text size in pixels.
    pub caption_px: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            module_px: 10,
            border_modules: 4,
            size: 500,
            filter: FilterType::Lanczos3,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            caption: true,
            caption_height: 80,
            caption_px: 36.0,
        }
    }
}

impl RenderOptions {
    /// Create options with the default artifact layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for a bare code without a caption band.
    pub fn without_caption() -> Self {
        Self {
            caption: false,
            ..Self::default()
        }
    }

    /// Final image dimensions as (width, height).
    pub fn output_dimensions(&self) -> (u32, u32) {
        if self.caption {
            (self.size, self.size.saturating_add(self.caption_height))
        } else {
            (self.size, self.size)
        }
    }

    /// Check that the options can produce a non-empty image.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.size == 0 {
            return Err(RenderError::InvalidOptions("size must be non-zero".into()));
        }
        if self.size > MAX_DIMENSION {
            return Err(RenderError::InvalidOptions(format!(
                "size must be at most {MAX_DIMENSION}, got {}",
                self.size
            )));
        }
        if self.module_px == 0 {
            return Err(RenderError::InvalidOptions(
                "module_px must be non-zero".into(),
            ));
        }
        if self.module_px > MAX_MODULE_PX {
            return Err(RenderError::InvalidOptions(format!(
                "module_px must be at most {MAX_MODULE_PX}, got {}",
                self.module_px
            )));
        }
        if self.caption && self.caption_height > MAX_DIMENSION {
            return Err(RenderError::InvalidOptions(format!(
                "caption_height must be at most {MAX_DIMENSION}, got {}",
                self.caption_height
            )));
        }
        if self.caption && !(self.caption_px.is_finite() && self.caption_px > 0.0) {
            return Err(RenderError::InvalidOptions(format!(
                "caption_px must be positive, got {}",
                self.caption_px
            )));
        }
        Ok(())
    }
}
