use image::RgbImage;

use crate::canvas::composite::{PremulRgba8, flatten_onto, over};
use crate::canvas::occupancy::OccupancyPredicate;
use crate::foundation::core::{CanvasSize, IRect, Point};
use crate::foundation::error::{GlyphError, GlyphResult};
use crate::foundation::math::Fnv1a64;
use crate::stroke::model::Stroke;

/// How the working buffer relates to the final opaque background.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundPolicy {
    /// Start fully transparent and flatten onto the background colour when finalizing.
    #[default]
    Deferred,
    /// Fill with the opaque background colour up front.
    Opaque,
}

/// Mutable premultiplied RGBA8 working buffer of fixed extent.
#[derive(Clone, Debug)]
pub struct Canvas {
    size: CanvasSize,
    data: Vec<u8>,
    background: [u8; 3],
}

impl Canvas {
    /// Allocate a canvas according to `policy`.
    pub fn new(size: CanvasSize, policy: BackgroundPolicy, background: [u8; 3]) -> Self {
        let fill = match policy {
            BackgroundPolicy::Deferred => [0, 0, 0, 0],
            BackgroundPolicy::Opaque => [background[0], background[1], background[2], 255],
        };
        Self {
            size,
            data: fill.repeat(size.area() as usize),
            background,
        }
    }

    /// A transparent canvas that flattens onto black.
    pub fn transparent(size: CanvasSize) -> Self {
        Self::new(size, BackgroundPolicy::Deferred, [0, 0, 0])
    }

    pub fn size(&self) -> CanvasSize {
        self.size
    }

    /// Premultiplied pixel at `(x, y)`; callers must stay in bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> PremulRgba8 {
        let idx = self.index(x, y);
        let d = &self.data[idx..idx + 4];
        [d[0], d[1], d[2], d[3]]
    }

    /// Premultiplied RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Blend `stroke` over the canvas with its top-left corner at `at`.
    ///
    /// Parts of the stroke outside the canvas are clipped. Returns the number of canvas pixels
    /// that received a non-transparent stroke sample.
    pub fn composite(&mut self, stroke: &Stroke, at: Point) -> usize {
        let stroke_rect = IRect::from_origin_size(at, stroke.width(), stroke.height());
        let Some(clip) = stroke_rect.intersect(self.size.rect()) else {
            return 0;
        };

        let mut touched = 0;
        for cy in clip.y0..clip.y1 {
            for cx in clip.x0..clip.x1 {
                let src = stroke.pixel((cx - at.x) as u32, (cy - at.y) as u32);
                if src[3] == 0 {
                    continue;
                }
                let idx = self.index(cx as u32, cy as u32);
                let dst = [
                    self.data[idx],
                    self.data[idx + 1],
                    self.data[idx + 2],
                    self.data[idx + 3],
                ];
                self.data[idx..idx + 4].copy_from_slice(&over(dst, src));
                touched += 1;
            }
        }
        touched
    }

    /// Fraction of canvas pixels the predicate considers inked, in `[0, 1]`.
    pub fn coverage(&self, predicate: OccupancyPredicate) -> f64 {
        let total = self.size.area();
        if total == 0 {
            return 0.0;
        }
        let inked = self
            .data
            .chunks_exact(4)
            .filter(|px| predicate.is_occupied([px[0], px[1], px[2], px[3]]))
            .count();
        inked as f64 / total as f64
    }

    /// Flatten onto the opaque background colour and drop alpha.
    pub fn flatten(&self) -> GlyphImage {
        let mut rgb = Vec::with_capacity((self.size.area() as usize) * 3);
        for px in self.data.chunks_exact(4) {
            let px = [px[0], px[1], px[2], px[3]];
            rgb.extend_from_slice(&flatten_onto(px, self.background));
        }
        GlyphImage {
            width: self.size.width,
            height: self.size.height,
            data: rgb,
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.size.width as usize) + (x as usize)) * 4
    }
}

/// Finalized opaque output raster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl GlyphImage {
    /// RGB value at `(x, y)`; callers must stay in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 3;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }

    /// Stable FNV-1a hash over the extent and pixel bytes.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        h.write_u32(self.width);
        h.write_u32(self.height);
        h.write_bytes(&self.data);
        h.finish()
    }

    /// Convert into an `image` buffer for encoding.
    pub fn to_rgb_image(&self) -> GlyphResult<RgbImage> {
        RgbImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| GlyphError::validation("glyph image buffer does not match its extent"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/surface.rs"]
mod tests;
