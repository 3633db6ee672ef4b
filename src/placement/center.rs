use rand::Rng;

use crate::canvas::overlap::{OverlapRule, evaluate};
use crate::canvas::surface::Canvas;
use crate::foundation::core::{GlyphRng, Point, to_i32};
use crate::foundation::math::lerp_px;
use crate::placement::strategy::{BestEffort, Candidate, PlacementStrategy, SearchOutcome};
use crate::stroke::model::Stroke;

/// Random search pulled toward the canvas centre as attempts accumulate.
///
/// Attempt `i` draws a uniform position and moves it toward the centred position by
/// `max_pull * i / (attempts - 1)`. Strokes at least as wide or as tall as the canvas are
/// rejected up front with [`SearchOutcome::TooLarge`].
#[derive(Clone, Debug)]
pub struct CenterAttraction {
    /// Samples before giving up.
    pub attempts: u32,
    /// Pull factor reached on the final attempt, in `[0, 1]`.
    pub max_pull: f64,
    /// Acceptance rule.
    pub rule: OverlapRule,
}

impl CenterAttraction {
    /// Pull factor for attempt `i`.
    pub fn pull_at(&self, i: u32) -> f64 {
        if self.attempts <= 1 {
            return 0.0;
        }
        self.max_pull * f64::from(i) / f64::from(self.attempts - 1)
    }
}

impl PlacementStrategy for CenterAttraction {
    fn name(&self) -> &'static str {
        "center_attraction"
    }

    fn search(&self, canvas: &Canvas, stroke: &Stroke, rng: &mut GlyphRng) -> SearchOutcome {
        let size = canvas.size();
        if stroke.width() >= size.width || stroke.height() >= size.height {
            return SearchOutcome::TooLarge;
        }

        let max_x = to_i32(size.width - stroke.width());
        let max_y = to_i32(size.height - stroke.height());
        let centre = Point::new(max_x / 2, max_y / 2);
        let mut best = BestEffort::default();

        for i in 0..self.attempts {
            let base = Point::new(rng.gen_range(0..=max_x), rng.gen_range(0..=max_y));
            let t = self.pull_at(i);
            let p = Point::new(
                lerp_px(base.x, centre.x, t).clamp(0, max_x),
                lerp_px(base.y, centre.y, t).clamp(0, max_y),
            );
            let outcome = evaluate(canvas, stroke, p, &self.rule);
            if !outcome.is_rejected() {
                return SearchOutcome::Found(Candidate::at(p));
            }
            best.offer(p, outcome);
        }

        tracing::trace!(attempts = self.attempts, "center attraction exhausted");
        SearchOutcome::Exhausted {
            fallback: best.into_candidate(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/placement/center.rs"]
mod tests;
