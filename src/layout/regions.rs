use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};

use crate::foundation::core::{CanvasSize, IRect, Point, to_i32};

/// Index of the centre cell in [`grid_regions`].
pub const CENTER_REGION: usize = 4;

/// Number of cells per grid axis.
pub const GRID_ARITY: usize = 3;

/// Split the canvas into a 3x3 grid, row-major from the top-left cell.
///
/// Cell boundaries sit at `w/3` and `2w/3` (integer division), so the last row and
/// column absorb any remainder.
pub fn grid_regions(size: CanvasSize) -> Vec<IRect> {
    let w = to_i32(size.width);
    let h = to_i32(size.height);
    let xs = [0, w / 3, 2 * w / 3, w];
    let ys = [0, h / 3, 2 * h / 3, h];

    let mut out = Vec::with_capacity(GRID_ARITY * GRID_ARITY);
    for row in 0..GRID_ARITY {
        for col in 0..GRID_ARITY {
            out.push(IRect::new(xs[col], ys[row], xs[col + 1], ys[row + 1]));
        }
    }
    out
}

/// Index of the first region whose inclusive bounds contain `p`.
pub fn region_containing(regions: &[IRect], p: Point) -> Option<usize> {
    regions.iter().position(|r| r.contains_inclusive(p))
}

/// Horizontal canvas edge a stroke can be pinned to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalEdge {
    /// `x = 0`.
    Left,
    /// `x + w = canvas width`.
    Right,
}

/// Vertical canvas edge a stroke can be pinned to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalEdge {
    /// `y = 0`.
    Top,
    /// `y + h = canvas height`.
    Bottom,
}

/// Edges a boundary-anchored stroke must touch. At least one axis should be set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Anchor {
    /// Pinned horizontal edge, if any.
    pub x: Option<HorizontalEdge>,
    /// Pinned vertical edge, if any.
    pub y: Option<VerticalEdge>,
}

impl Anchor {
    /// Anchor touching one horizontal and one vertical edge.
    pub const fn corner(x: HorizontalEdge, y: VerticalEdge) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }

    pub const fn left() -> Self {
        Self {
            x: Some(HorizontalEdge::Left),
            y: None,
        }
    }

    pub const fn right() -> Self {
        Self {
            x: Some(HorizontalEdge::Right),
            y: None,
        }
    }

    pub const fn top() -> Self {
        Self {
            x: None,
            y: Some(VerticalEdge::Top),
        }
    }

    pub const fn bottom() -> Self {
        Self {
            x: None,
            y: Some(VerticalEdge::Bottom),
        }
    }
}

/// The four corner anchors in placement order.
pub fn boundary_anchors() -> [Anchor; 4] {
    use HorizontalEdge::{Left, Right};
    use VerticalEdge::{Bottom, Top};
    [
        Anchor::corner(Left, Top),
        Anchor::corner(Right, Top),
        Anchor::corner(Left, Bottom),
        Anchor::corner(Right, Bottom),
    ]
}

/// Per-region placement counters used to steer strokes toward sparse cells.
#[derive(Clone, Debug)]
pub struct RegionOccupancy {
    counts: Vec<u32>,
}

impl RegionOccupancy {
    pub fn new(regions: usize) -> Self {
        Self {
            counts: vec![0; regions],
        }
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// Record one accepted placement in region `idx`.
    pub fn record(&mut self, idx: usize) {
        if let Some(c) = self.counts.get_mut(idx) {
            *c += 1;
        }
    }

    /// Selection weight per region, `1 / (count + 1)`.
    pub fn weights(&self) -> Vec<f64> {
        self.counts
            .iter()
            .map(|&c| 1.0 / (f64::from(c) + 1.0))
            .collect()
    }

    /// Draw `k` region indices with replacement, weighted toward sparse regions.
    pub fn sample<R: Rng + ?Sized>(&self, k: usize, rng: &mut R) -> Vec<usize> {
        let Ok(dist) = WeightedIndex::new(self.weights()) else {
            return Vec::new();
        };
        (0..k).map(|_| dist.sample(rng)).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/regions.rs"]
mod tests;
