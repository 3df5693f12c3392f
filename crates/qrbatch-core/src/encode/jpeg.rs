//! JPEG encoding for artifacts.
//!
//! Uses the `image` crate's JPEG encoder. Artifacts are written at high
//! quality by default so the QR modules stay crisp after compression.

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage};
use std::io::Cursor;
use thiserror::Error;

/// Quality used for artifacts unless the render options override it.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Errors that can occur during JPEG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// JPEG encoding failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode an RGB image to JPEG bytes.
///
/// `quality` is clamped to 1-100.
///
/// # Example
///
/// ```
/// use image::RgbImage;
/// use qrbatch_core::encode::encode_jpeg;
///
/// let img = RgbImage::from_pixel(100, 100, image::Rgb([255, 255, 255]));
/// let jpeg = encode_jpeg(&img, 95).unwrap();
/// assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
/// ```
pub fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let quality = quality.clamp(1, 100);
    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);

    encoder
        .write_image(image.as_raw(), width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Same input always produces same output (deterministic).
        #[test]
        fn prop_deterministic_output(
            (width, height) in (1u32..=24, 1u32..=24),
            quality in 1u8..=100,
        ) {
            let img = RgbImage::from_fn(width, height, |x, y| {
                image::Rgb([(x * 10) as u8, (y * 10) as u8, 128])
            });
            let a = encode_jpeg(&img, quality);
            let b = encode_jpeg(&img, quality);
            prop_assert!(a.is_ok() && b.is_ok());
            prop_assert_eq!(a.unwrap(), b.unwrap());
        }

        /// Property: Any non-empty image encodes with a valid SOI marker.
        #[test]
        fn prop_valid_input_produces_valid_jpeg(
            (width, height) in (1u32..=40, 1u32..=40),
            quality in 0u8..=255,
        ) {
            let img = RgbImage::from_pixel(width, height, image::Rgb([128, 128, 128]));
            let jpeg = encode_jpeg(&img, quality);
            prop_assert!(jpeg.is_ok());
            let jpeg = jpeg.unwrap();
            prop_assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
        }
    }
}
