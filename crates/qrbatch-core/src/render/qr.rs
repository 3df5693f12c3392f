//! QR matrix encoding and rasterization.

use image::{imageops, Rgb, RgbImage};
use qrcode::{Color, EcLevel, QrCode};

use super::{FilterType, RenderError};

const DARK: Rgb<u8> = Rgb([0, 0, 0]);
const LIGHT: Rgb<u8> = Rgb([255, 255, 255]);

/// A square grid of QR modules, `true` meaning dark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrMatrix {
    width: usize,
    modules: Vec<bool>,
}

impl QrMatrix {
    /// Number of modules per side (without quiet zone).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Whether the module at (x, y) is dark. Out of range reads as light.
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.width {
            return false;
        }
        self.modules[y * self.width + x]
    }

    /// Count of dark modules.
    pub fn dark_count(&self) -> usize {
        self.modules.iter().filter(|&&m| m).count()
    }
}

/// Encode `data` at error-correction level H, picking the smallest version
/// that fits.
pub fn encode_matrix(data: &str) -> Result<QrMatrix, RenderError> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::H)
        .map_err(|e| RenderError::QrEncoding(e.to_string()))?;

    let width = code.width();
    let modules = code
        .to_colors()
        .into_iter()
        .map(|c| c == Color::Dark)
        .collect();

    Ok(QrMatrix { width, modules })
}

/// Rasterize a matrix at `module_px` pixels per module with a quiet zone of
/// `border` modules on every side.
pub fn rasterize(matrix: &QrMatrix, module_px: u32, border: u32) -> Result<RgbImage, RenderError> {
    if module_px == 0 {
        return Err(RenderError::InvalidOptions(
            "module_px must be non-zero".into(),
        ));
    }

    let modules = u32::try_from(matrix.width())
        .map_err(|_| RenderError::InvalidOptions("QR matrix too large".into()))?;
    let side = border
        .checked_mul(2)
        .and_then(|b| b.checked_add(modules))
        .and_then(|m| m.checked_mul(module_px))
        .ok_or_else(|| RenderError::InvalidOptions("raster size overflows".into()))?;

    Ok(RgbImage::from_fn(side, side, |px, py| {
        let mx = px / module_px;
        let my = py / module_px;
        if mx < border || my < border {
            return LIGHT;
        }
        if matrix.is_dark((mx - border) as usize, (my - border) as usize) {
            DARK
        } else {
            LIGHT
        }
    }))
}

/// Scale a rasterized code to a `size` x `size` square.
pub fn scale_to_square(image: &RgbImage, size: u32, filter: FilterType) -> RgbImage {
    if image.width() == size && image.height() == size {
        return image.clone();
    }
    imageops::resize(image, size, size, filter.to_image_filter())
}
