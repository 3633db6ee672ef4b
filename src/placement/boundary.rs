use rand::Rng;

use crate::canvas::overlap::{OverlapRule, evaluate};
use crate::canvas::surface::Canvas;
use crate::foundation::core::{CanvasSize, GlyphRng, Point, to_i32};
use crate::layout::regions::{Anchor, HorizontalEdge, VerticalEdge};
use crate::placement::strategy::{Candidate, PlacementStrategy, SearchOutcome};
use crate::stroke::model::Stroke;

/// Forced fit for structural strokes: rescale to span the canvas, then pin to edges.
///
/// The first attempt uses the canonical anchored position. Later attempts shift the stroke
/// along its unconstrained axis by up to `max_jitter` pixels. Anchored axes never move, so
/// the stroke always touches its edges exactly.
#[derive(Clone, Debug)]
pub struct BoundaryAnchor {
    /// Edges to touch.
    pub anchor: Anchor,
    /// Attempts before giving up on an overlap-free position.
    pub attempts: u32,
    /// Largest shift along the unconstrained axis, in pixels.
    pub max_jitter: u32,
    /// Acceptance rule.
    pub rule: OverlapRule,
}

/// Largest fitted extent along an axis, as a multiple of the canvas side on that axis.
pub const MAX_FIT_OVERSHOOT: u32 = 4;

/// Rescale `stroke` so that it spans the canvas along every anchored axis.
///
/// - only a horizontal edge: width becomes the canvas width, height is kept;
/// - only a vertical edge: height becomes the canvas height, width is kept;
/// - both: uniform scale `max(cw / sw, ch / sh)`, covering both dimensions.
///
/// A corner fit of a very thin stroke would blow the other axis up far beyond the canvas,
/// so each fitted side is capped at [`MAX_FIT_OVERSHOOT`] times the canvas side. The
/// stroke still covers both dimensions but is no longer scaled uniformly.
pub fn fit_to_anchor(stroke: &Stroke, canvas: CanvasSize, anchor: Anchor) -> Stroke {
    let (sw, sh) = (stroke.width(), stroke.height());
    if sw == 0 || sh == 0 {
        return stroke.clone();
    }
    let (w, h) = match (anchor.x, anchor.y) {
        (Some(_), Some(_)) => {
            let sx = f64::from(canvas.width) / f64::from(sw);
            let sy = f64::from(canvas.height) / f64::from(sh);
            let s = sx.max(sy);
            (
                scale_dim(sw, s).min(canvas.width.saturating_mul(MAX_FIT_OVERSHOOT)),
                scale_dim(sh, s).min(canvas.height.saturating_mul(MAX_FIT_OVERSHOOT)),
            )
        }
        (Some(_), None) => (canvas.width, sh),
        (None, Some(_)) => (sw, canvas.height),
        (None, None) => (sw, sh),
    };
    stroke.resized(w, h)
}

fn scale_dim(v: u32, s: f64) -> u32 {
    ((f64::from(v) * s).round() as u32).max(1)
}

/// Canonical top-left position of a `width x height` stroke pinned to `anchor`.
///
/// Unanchored axes are centred.
pub fn anchored_position(width: u32, height: u32, canvas: CanvasSize, anchor: Anchor) -> Point {
    let slack_x = to_i32(canvas.width) - to_i32(width);
    let slack_y = to_i32(canvas.height) - to_i32(height);
    let x = match anchor.x {
        Some(HorizontalEdge::Left) => 0,
        Some(HorizontalEdge::Right) => slack_x,
        None => slack_x / 2,
    };
    let y = match anchor.y {
        Some(VerticalEdge::Top) => 0,
        Some(VerticalEdge::Bottom) => slack_y,
        None => slack_y / 2,
    };
    Point::new(x, y)
}

impl BoundaryAnchor {
    fn jittered(
        &self,
        canonical: Point,
        fitted: &Stroke,
        canvas: CanvasSize,
        rng: &mut GlyphRng,
    ) -> Point {
        let j = to_i32(self.max_jitter);
        let mut p = canonical;
        if self.anchor.x.is_none() {
            let slack = to_i32(canvas.width) - to_i32(fitted.width());
            p.x = (p.x + rng.gen_range(-j..=j)).clamp(slack.min(0), slack.max(0));
        }
        if self.anchor.y.is_none() {
            let slack = to_i32(canvas.height) - to_i32(fitted.height());
            p.y = (p.y + rng.gen_range(-j..=j)).clamp(slack.min(0), slack.max(0));
        }
        p
    }
}

impl PlacementStrategy for BoundaryAnchor {
    fn name(&self) -> &'static str {
        "boundary_anchor"
    }

    fn search(&self, canvas: &Canvas, stroke: &Stroke, rng: &mut GlyphRng) -> SearchOutcome {
        let size = canvas.size();
        let fitted = fit_to_anchor(stroke, size, self.anchor);
        let canonical = anchored_position(fitted.width(), fitted.height(), size, self.anchor);

        // A corner anchor leaves no free axis, so every attempt would test the same spot.
        let has_free_axis = self.anchor.x.is_none() || self.anchor.y.is_none();
        let attempts = if has_free_axis && self.max_jitter > 0 {
            self.attempts.max(1)
        } else {
            1
        };

        for attempt in 0..attempts {
            let p = if attempt == 0 {
                canonical
            } else {
                self.jittered(canonical, &fitted, size, rng)
            };
            if !evaluate(canvas, &fitted, p, &self.rule).is_rejected() {
                return SearchOutcome::Found(Candidate {
                    position: p,
                    stroke: Some(fitted),
                });
            }
        }

        tracing::trace!(anchor = ?self.anchor, attempts, "boundary fit exhausted");
        SearchOutcome::Exhausted {
            fallback: Some(Candidate {
                position: canonical,
                stroke: Some(fitted),
            }),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/placement/boundary.rs"]
mod tests;
