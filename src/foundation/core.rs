use crate::foundation::error::{GlyphError, GlyphResult};

/// Random source threaded through every placement call.
///
/// One generator is owned per composition so that a fixed seed reproduces a run end-to-end.
pub type GlyphRng = rand::rngs::StdRng;

/// Fixed pixel extent of a composition canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct CanvasSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl CanvasSize {
    /// Extent used when no reference image is available for a subject.
    pub const DEFAULT: Self = Self {
        width: 256,
        height: 256,
    };

    /// Create a validated, non-empty canvas extent.
    pub fn new(width: u32, height: u32) -> GlyphResult<Self> {
        if width == 0 || height == 0 {
            return Err(GlyphError::validation(format!(
                "canvas size must be non-empty, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Number of pixels covered by the canvas.
    pub fn area(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// The canvas as a rectangle anchored at the origin.
    pub fn rect(self) -> IRect {
        IRect::from_origin_size(Point::ORIGIN, self.width, self.height)
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Integer pixel position (top-left corner of a placed stroke).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Point {
    /// Horizontal offset in pixels, may be negative.
    pub x: i32,
    /// Vertical offset in pixels, may be negative.
    pub y: i32,
}

impl Point {
    /// The canvas origin.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Create a point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Half-open integer rectangle `[x0, x1) x [y0, y1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct IRect {
    /// Left edge (inclusive).
    pub x0: i32,
    /// Top edge (inclusive).
    pub y0: i32,
    /// Right edge (exclusive).
    pub x1: i32,
    /// Bottom edge (exclusive).
    pub y1: i32,
}

impl IRect {
    /// Create a rectangle from its edges.
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Create a rectangle from a top-left corner and a size.
    pub fn from_origin_size(origin: Point, width: u32, height: u32) -> Self {
        Self {
            x0: origin.x,
            y0: origin.y,
            x1: origin.x.saturating_add(to_i32(width)),
            y1: origin.y.saturating_add(to_i32(height)),
        }
    }

    /// Width, zero for inverted rectangles.
    pub fn width(self) -> u32 {
        (i64::from(self.x1) - i64::from(self.x0)).max(0) as u32
    }

    /// Height, zero for inverted rectangles.
    pub fn height(self) -> u32 {
        (i64::from(self.y1) - i64::from(self.y0)).max(0) as u32
    }

    /// Return `true` when the rectangle covers no pixel.
    pub fn is_empty(self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }

    /// Positive-area intersection of two rectangles, if any.
    pub fn intersect(self, other: Self) -> Option<Self> {
        let r = Self {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        };
        if r.is_empty() { None } else { Some(r) }
    }

    /// Inclusive containment test: points on the right/bottom edge count as inside.
    pub fn contains_inclusive(self, p: Point) -> bool {
        self.x0 <= p.x && p.x <= self.x1 && self.y0 <= p.y && p.y <= self.y1
    }

    /// Top-left corner.
    pub fn origin(self) -> Point {
        Point::new(self.x0, self.y0)
    }
}

pub(crate) fn to_i32(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
