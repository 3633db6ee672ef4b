use crate::canvas::occupancy::OccupancyPredicate;
use crate::canvas::surface::Canvas;
use crate::foundation::core::{IRect, Point};
use crate::stroke::model::{Stroke, VISIBLE_ALPHA_FLOOR};

/// Acceptance rule for a candidate placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlapRule {
    /// Largest tolerated fraction of the stroke's ink landing on occupied canvas pixels.
    pub threshold: f64,
    /// Stroke pixels with alpha at or below this are not ink.
    pub stroke_floor: u8,
    /// Test for already occupied canvas pixels.
    pub occupancy: OccupancyPredicate,
}

impl OverlapRule {
    /// Rule with the default alpha floors and the given threshold.
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            stroke_floor: VISIBLE_ALPHA_FLOOR,
            occupancy: OccupancyPredicate::default(),
        }
    }
}

/// Result of testing one candidate position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OverlapOutcome {
    /// Accepted; `ratio` is the measured coincidence (0 for vacuous accepts).
    Clear {
        /// Fraction of on-canvas stroke ink that hit occupied pixels.
        ratio: f64,
    },
    /// Rejected because the coincidence exceeded the threshold.
    Overlapping {
        /// Fraction of on-canvas stroke ink that hit occupied pixels.
        ratio: f64,
    },
    /// Rejected because the stroke box lies strictly outside the canvas.
    OutOfBounds,
}

impl OverlapOutcome {
    /// Return `true` for every rejecting outcome.
    pub fn is_rejected(self) -> bool {
        !matches!(self, Self::Clear { .. })
    }

    /// Coincidence ratio used to rank rejected candidates; out-of-bounds ranks last.
    pub fn ratio(self) -> f64 {
        match self {
            Self::Clear { ratio } | Self::Overlapping { ratio } => ratio,
            Self::OutOfBounds => f64::INFINITY,
        }
    }
}

/// Measure how much of `stroke`, placed at `at`, lands on already inked canvas pixels.
pub fn evaluate(
    canvas: &Canvas,
    stroke: &Stroke,
    at: Point,
    rule: &OverlapRule,
) -> OverlapOutcome {
    if stroke.ink_pixels() == 0 {
        return OverlapOutcome::Clear { ratio: 0.0 };
    }

    let stroke_rect = IRect::from_origin_size(at, stroke.width(), stroke.height());
    let bounds = canvas.size().rect();
    if stroke_rect.x0 > bounds.x1
        || stroke_rect.x1 < bounds.x0
        || stroke_rect.y0 > bounds.y1
        || stroke_rect.y1 < bounds.y0
    {
        return OverlapOutcome::OutOfBounds;
    }
    // Boxes that only share an edge with the canvas cover no pixel and cannot collide.
    let Some(clip) = stroke_rect.intersect(bounds) else {
        return OverlapOutcome::Clear { ratio: 0.0 };
    };

    let mut ink = 0usize;
    let mut hits = 0usize;
    for cy in clip.y0..clip.y1 {
        for cx in clip.x0..clip.x1 {
            let sa = stroke.pixel((cx - at.x) as u32, (cy - at.y) as u32)[3];
            if sa <= rule.stroke_floor {
                continue;
            }
            ink += 1;
            if rule.occupancy.is_occupied(canvas.pixel(cx as u32, cy as u32)) {
                hits += 1;
            }
        }
    }

    if ink == 0 {
        return OverlapOutcome::Clear { ratio: 0.0 };
    }
    let ratio = hits as f64 / ink as f64;
    if ratio > rule.threshold {
        OverlapOutcome::Overlapping { ratio }
    } else {
        OverlapOutcome::Clear { ratio }
    }
}

/// Return `true` when placing `stroke` at `at` must be rejected under `rule`.
pub fn overlaps(canvas: &Canvas, stroke: &Stroke, at: Point, rule: &OverlapRule) -> bool {
    evaluate(canvas, stroke, at, rule).is_rejected()
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/overlap.rs"]
mod tests;
