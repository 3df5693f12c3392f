//! QR rendering pipeline for QR Batch.
//!
//! This module provides functionality for:
//! - Encoding a target string into a QR matrix (error-correction level H)
//! - Rasterizing the matrix with a fixed module size and quiet zone
//! - Scaling to a fixed square output size
//! - Composing a caption band with the label beneath the code
//!
//! # Examples
//!
//! ```ignore
//! use qrbatch_core::render::{Renderer, RenderOptions};
//!
//! let renderer = Renderer::new(RenderOptions::default());
//! let img = renderer.render("https://a.example", "Store A").unwrap();
//! assert_eq!(img.dimensions(), (500, 580));
//! ```

mod caption;
mod glyphs;
mod qr;
mod types;

pub use caption::{CaptionFont, CaptionFontKind};
pub use qr::{encode_matrix, rasterize, scale_to_square, QrMatrix};
pub use types::{FilterType, RenderError, RenderOptions};

use image::{imageops, Rgb, RgbImage};

use crate::encode::encode_jpeg;

/// Renders targets to artifact images with a fixed layout and caption font.
#[derive(Debug, Default)]
pub struct Renderer {
    options: RenderOptions,
    font: CaptionFont,
}

impl Renderer {
    /// Create a renderer using the built-in caption glyphs.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            font: CaptionFont::Builtin,
        }
    }

    /// Create a renderer with an already resolved caption font.
    pub fn with_font(options: RenderOptions, font: CaptionFont) -> Self {
        Self { options, font }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn font_kind(&self) -> CaptionFontKind {
        self.font.kind()
    }

    /// Render `target` as a QR code, with `caption` beneath it when captions
    /// are enabled.
    pub fn render(&self, target: &str, caption: &str) -> Result<RgbImage, RenderError> {
        self.options.validate()?;

        let matrix = encode_matrix(target)?;
        let raster = rasterize(&matrix, self.options.module_px, self.options.border_modules)?;
        let code = scale_to_square(&raster, self.options.size, self.options.filter);

        if !self.options.caption {
            return Ok(code);
        }

        let (width, height) = self.options.output_dimensions();
        let mut canvas = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));
        imageops::replace(&mut canvas, &code, 0, 0);
        self.font.draw(
            &mut canvas,
            self.options.size,
            self.options.caption_height,
            caption,
            self.options.caption_px,
        );
        Ok(canvas)
    }

    /// Render and encode to JPEG at the configured quality.
    pub fn render_jpeg(&self, target: &str, caption: &str) -> Result<RenderedImage, RenderError> {
        let image = self.render(target, caption)?;
        let jpeg = encode_jpeg(&image, self.options.jpeg_quality)?;
        Ok(RenderedImage {
            width: image.width(),
            height: image.height(),
            jpeg,
        })
    }
}

/// JPEG bytes of a rendered artifact with its dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    pub width: u32,
    pub height: u32,
    pub jpeg: Vec<u8>,
}
