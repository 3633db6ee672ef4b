use std::sync::Arc;

use image::{ImageBuffer, Rgba, RgbaImage, imageops::FilterType};

use crate::foundation::core::CanvasSize;
use crate::foundation::error::{GlyphError, GlyphResult};
use crate::foundation::math::premultiply_rgba8_in_place;

/// Alpha values at or below this level are treated as anti-aliasing noise, not ink.
pub const VISIBLE_ALPHA_FLOOR: u8 = 10;

/// Aspect factor beyond which a stroke counts as horizontal or vertical.
const ORIENTATION_FACTOR: f64 = 1.5;

/// Importance multiplier for strokes with a dominant orientation.
const ORIENTATION_BONUS: f64 = 1.5;

/// Orientation class of a stroke, derived from its bounding box only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokeKind {
    /// Width exceeds 1.5x the height.
    Horizontal,
    /// Height exceeds 1.5x the width.
    Vertical,
    /// Everything else, including exact 1.5 ratios.
    Other,
}

impl StrokeKind {
    /// Return `true` for horizontal and vertical strokes.
    pub fn is_oriented(self) -> bool {
        !matches!(self, Self::Other)
    }
}

/// Classify a stroke bounding box.
pub fn classify(width: u32, height: u32) -> StrokeKind {
    let (w, h) = (f64::from(width), f64::from(height));
    if w > h * ORIENTATION_FACTOR {
        StrokeKind::Horizontal
    } else if h > w * ORIENTATION_FACTOR {
        StrokeKind::Vertical
    } else {
        StrokeKind::Other
    }
}

/// Structural importance of a stroke relative to a canvas.
///
/// `area / canvas_area`, boosted by 1.5 for horizontal and vertical strokes.
pub fn importance(stroke: &Stroke, canvas: CanvasSize) -> f64 {
    let canvas_area = canvas.area();
    if canvas_area == 0 {
        return 0.0;
    }
    let area_ratio = stroke.area() as f64 / canvas_area as f64;
    let bonus = if stroke.kind().is_oriented() {
        ORIENTATION_BONUS
    } else {
        1.0
    };
    area_ratio * bonus
}

/// One rasterized stroke fragment.
///
/// Pixels are stored as premultiplied RGBA8, row-major, tightly packed. The buffer is shared,
/// so cloning a stroke is cheap. A stroke never changes after construction.
#[derive(Clone, Debug)]
pub struct Stroke {
    width: u32,
    height: u32,
    rgba8_premul: Arc<Vec<u8>>,
    ink_pixels: usize,
}

impl Stroke {
    /// Build a stroke from straight (non-premultiplied) RGBA8 pixels.
    pub fn from_rgba8(width: u32, height: u32, mut rgba8: Vec<u8>) -> GlyphResult<Self> {
        check_len(width, height, rgba8.len())?;
        premultiply_rgba8_in_place(&mut rgba8);
        Ok(Self::from_checked(width, height, rgba8))
    }

    /// Build a stroke from already premultiplied RGBA8 pixels.
    pub fn from_rgba8_premul(width: u32, height: u32, rgba8_premul: Vec<u8>) -> GlyphResult<Self> {
        check_len(width, height, rgba8_premul.len())?;
        Ok(Self::from_checked(width, height, rgba8_premul))
    }

    /// Build a stroke from a decoded straight-alpha image.
    pub fn from_rgba_image(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let mut data = img.into_raw();
        premultiply_rgba8_in_place(&mut data);
        Self::from_checked(width, height, data)
    }

    /// A rectangular stroke filled with one straight-alpha colour.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let mut data = rgba.repeat((width as usize) * (height as usize));
        premultiply_rgba8_in_place(&mut data);
        Self::from_checked(width, height, data)
    }

    fn from_checked(width: u32, height: u32, rgba8_premul: Vec<u8>) -> Self {
        let ink_pixels = rgba8_premul
            .chunks_exact(4)
            .filter(|px| px[3] > VISIBLE_ALPHA_FLOOR)
            .count();
        Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
            ink_pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel count of the bounding box.
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// `max(w, h) / min(w, h)`, or `1.0` for zero-extent strokes.
    pub fn aspect_ratio(&self) -> f64 {
        let lo = self.width.min(self.height);
        if lo == 0 {
            return 1.0;
        }
        f64::from(self.width.max(self.height)) / f64::from(lo)
    }

    pub fn kind(&self) -> StrokeKind {
        classify(self.width, self.height)
    }

    pub fn importance(&self, canvas: CanvasSize) -> f64 {
        importance(self, canvas)
    }

    /// Number of pixels with alpha above [`VISIBLE_ALPHA_FLOOR`].
    pub fn ink_pixels(&self) -> usize {
        self.ink_pixels
    }

    /// Zero-area strokes and strokes without visible ink cannot contribute to a glyph.
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0 || self.ink_pixels == 0
    }

    /// Premultiplied pixel at `(x, y)`; callers must stay in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let d = &self.rgba8_premul[idx..idx + 4];
        [d[0], d[1], d[2], d[3]]
    }

    /// Premultiplied RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.rgba8_premul
    }

    /// Rescale to exactly `width x height` pixels with a triangle filter.
    pub fn resized(&self, width: u32, height: u32) -> Self {
        if width == self.width && height == self.height {
            return self.clone();
        }
        if width == 0 || height == 0 || self.width == 0 || self.height == 0 {
            let len = (width as usize) * (height as usize) * 4;
            return Self::from_checked(width, height, vec![0; len]);
        }
        let Some(src): Option<ImageBuffer<Rgba<u8>, Vec<u8>>> =
            ImageBuffer::from_raw(self.width, self.height, self.rgba8_premul.to_vec())
        else {
            return self.clone();
        };
        // Filtering premultiplied samples keeps edges free of dark fringes.
        let out = image::imageops::resize(&src, width, height, FilterType::Triangle);
        Self::from_checked(width, height, out.into_raw())
    }
}

fn check_len(width: u32, height: u32, len: usize) -> GlyphResult<()> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| GlyphError::validation("stroke buffer size overflow"))?;
    if len != expected {
        return Err(GlyphError::validation(format!(
            "stroke buffer for {width}x{height} must be {expected} bytes, got {len}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/stroke/model.rs"]
mod tests;
