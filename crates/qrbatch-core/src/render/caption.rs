//! Caption text rendering beneath the code.
//!
//! The caption font is resolved once per processor from an ordered list of
//! candidate font files. The first candidate that parses wins; if none do, a
//! built-in bitmap renderer is used so captions never fail a row.

use std::fmt;

use ab_glyph::{point, Font, FontVec, Glyph, PxScale, ScaleFont};
use image::{Rgb, RgbImage};
use serde::Serialize;

use super::glyphs;

/// Horizontal padding kept free on each side of the caption.
const CAPTION_MARGIN: u32 = 10;

/// Which caption renderer was selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CaptionFontKind {
    /// A supplied font file, by position in the candidate list.
    Outline { index: usize },
    /// The built-in 5x7 bitmap glyphs.
    Builtin,
}

/// A resolved caption renderer.
#[derive(Default)]
pub enum CaptionFont {
    Outline { font: FontVec, index: usize },
    #[default]
    Builtin,
}

impl fmt::Debug for CaptionFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CaptionFont").field(&self.kind()).finish()
    }
}

impl CaptionFont {
    /// Pick the first candidate that parses as a font, else the built-in renderer.
    pub fn resolve<B: AsRef<[u8]>>(candidates: &[B]) -> Self {
        for (index, data) in candidates.iter().enumerate() {
            match FontVec::try_from_vec(data.as_ref().to_vec()) {
                Ok(font) => {
                    tracing::debug!(index, "using supplied caption font");
                    return CaptionFont::Outline { font, index };
                }
                Err(e) => {
                    tracing::warn!(index, error = %e, "skipping unreadable caption font");
                }
            }
        }
        tracing::debug!("no caption font available, using built-in glyphs");
        CaptionFont::Builtin
    }

    pub fn kind(&self) -> CaptionFontKind {
        match self {
            CaptionFont::Outline { index, .. } => CaptionFontKind::Outline { index: *index },
            CaptionFont::Builtin => CaptionFontKind::Builtin,
        }
    }

    /// Draw `text` centered horizontally and vertically within the band of
    /// `band_height` rows starting at `band_top`.
    ///
    /// Text that would not fit is shrunk; pixels outside the canvas are
    /// clipped.
    pub fn draw(&self, canvas: &mut RgbImage, band_top: u32, band_height: u32, text: &str, px: f32) {
        if text.is_empty() || band_height == 0 {
            return;
        }
        let max_width = canvas.width().saturating_sub(2 * CAPTION_MARGIN).max(1);
        match self {
            CaptionFont::Outline { font, .. } => {
                draw_outline(font, canvas, band_top, band_height, max_width, text, px)
            }
            CaptionFont::Builtin => {
                draw_bitmap(canvas, band_top, band_height, max_width, text, px)
            }
        }
    }
}

/// Lay out glyphs on a baseline at the font ascent, returning them with the
/// total advance width.
fn layout<F: Font>(font: &F, scale: PxScale, text: &str) -> (Vec<Glyph>, f32) {
    let scaled = font.as_scaled(scale);
    let mut glyphs = Vec::with_capacity(text.len());
    let mut caret = 0.0f32;
    let mut prev = None;
    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(prev) = prev {
            caret += scaled.kern(prev, id);
        }
        glyphs.push(id.with_scale_and_position(scale, point(caret, scaled.ascent())));
        caret += scaled.h_advance(id);
        prev = Some(id);
    }
    (glyphs, caret)
}

fn draw_outline(
    font: &FontVec,
    canvas: &mut RgbImage,
    band_top: u32,
    band_height: u32,
    max_width: u32,
    text: &str,
    px: f32,
) {
    let mut scale = PxScale::from(px);
    let (mut glyphs, mut width) = layout(font, scale, text);
    if width > max_width as f32 && width > 0.0 {
        scale = PxScale::from(px * max_width as f32 / width);
        (glyphs, width) = layout(font, scale, text);
    }

    let line_height = font.as_scaled(scale).height();
    let offset_x = ((canvas.width() as f32 - width) / 2.0).max(0.0);
    let offset_y = band_top as f32 + ((band_height as f32 - line_height) / 2.0).max(0.0);

    for glyph in glyphs {
        let Some(outlined) = font.outline_glyph(glyph) else {
            continue;
        };
        let bounds = outlined.px_bounds();
        outlined.draw(|gx, gy, coverage| {
            let x = offset_x + bounds.min.x + gx as f32;
            let y = offset_y + bounds.min.y + gy as f32;
            if x < 0.0 || y < 0.0 {
                return;
            }
            blend_dark(canvas, x as u32, y as u32, coverage);
        });
    }
}

fn draw_bitmap(
    canvas: &mut RgbImage,
    band_top: u32,
    band_height: u32,
    max_width: u32,
    text: &str,
    px: f32,
) {
    let units = glyphs::text_width_units(text);
    let mut cell = ((px / glyphs::GLYPH_HEIGHT as f32).floor() as u32).max(1);
    while cell > 1 && units * cell > max_width {
        cell -= 1;
    }

    let width = units * cell;
    let height = glyphs::GLYPH_HEIGHT * cell;
    let left = canvas.width().saturating_sub(width) / 2;
    let top = band_top + band_height.saturating_sub(height) / 2;

    for (i, c) in text.chars().enumerate() {
        let origin = left + i as u32 * glyphs::GLYPH_ADVANCE * cell;
        for row in 0..glyphs::GLYPH_HEIGHT {
            for col in 0..glyphs::GLYPH_WIDTH {
                if !glyphs::is_set(c, col, row) {
                    continue;
                }
                for dy in 0..cell {
                    for dx in 0..cell {
                        blend_dark(canvas, origin + col * cell + dx, top + row * cell + dy, 1.0);
                    }
                }
            }
        }
    }
}

/// Darken a pixel by `coverage` (0.0-1.0), clipping outside the canvas.
fn blend_dark(canvas: &mut RgbImage, x: u32, y: u32, coverage: f32) {
    if x >= canvas.width() || y >= canvas.height() {
        return;
    }
    let ink = 255.0 * (1.0 - coverage.clamp(0.0, 1.0));
    let pixel = canvas.get_pixel_mut(x, y);
    let Rgb([r, g, b]) = *pixel;
    let value = ink.round() as u8;
    *pixel = Rgb([r.min(value), g.min(value), b.min(value)]);
}
