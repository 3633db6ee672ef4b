use rand::Rng;
use rand::seq::SliceRandom;

use crate::canvas::overlap::{OverlapRule, evaluate};
use crate::canvas::surface::Canvas;
use crate::foundation::core::{GlyphRng, IRect, Point, to_i32};
use crate::placement::strategy::{BestEffort, Candidate, PlacementStrategy, SearchOutcome};
use crate::stroke::model::Stroke;

/// Uniform random search inside preferred regions, then over the whole canvas.
///
/// Regions are visited in a shuffled order and skipped when they are smaller than the
/// stroke. Each visited region and the final whole-canvas pass get `attempts` samples.
#[derive(Clone, Debug)]
pub struct RegionSearch {
    /// Preferred regions; duplicates are allowed and simply get more samples.
    pub regions: Vec<IRect>,
    /// Samples per region and for the whole-canvas pass.
    pub attempts: u32,
    /// Acceptance rule.
    pub rule: OverlapRule,
}

impl PlacementStrategy for RegionSearch {
    fn name(&self) -> &'static str {
        "region_search"
    }

    fn search(&self, canvas: &Canvas, stroke: &Stroke, rng: &mut GlyphRng) -> SearchOutcome {
        let (sw, sh) = (stroke.width(), stroke.height());
        let mut best = BestEffort::default();

        let mut regions = self.regions.clone();
        regions.shuffle(rng);

        for region in &regions {
            if region.width() < sw || region.height() < sh {
                continue;
            }
            let span_x = to_i32(region.width() - sw);
            let span_y = to_i32(region.height() - sh);
            for _ in 0..self.attempts {
                let p = Point::new(
                    region.x0 + rng.gen_range(0..=span_x),
                    region.y0 + rng.gen_range(0..=span_y),
                );
                let outcome = evaluate(canvas, stroke, p, &self.rule);
                if !outcome.is_rejected() {
                    return SearchOutcome::Found(Candidate::at(p));
                }
                best.offer(p, outcome);
            }
        }

        let size = canvas.size();
        let max_x = to_i32(size.width.saturating_sub(sw));
        let max_y = to_i32(size.height.saturating_sub(sh));
        for _ in 0..self.attempts {
            let p = Point::new(rng.gen_range(0..=max_x), rng.gen_range(0..=max_y));
            let outcome = evaluate(canvas, stroke, p, &self.rule);
            if !outcome.is_rejected() {
                return SearchOutcome::Found(Candidate::at(p));
            }
            best.offer(p, outcome);
        }

        tracing::trace!(
            regions = regions.len(),
            attempts = self.attempts,
            "region search exhausted"
        );
        SearchOutcome::Exhausted {
            fallback: best.into_candidate(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/placement/region_search.rs"]
mod tests;
