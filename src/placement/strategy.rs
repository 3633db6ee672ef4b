use crate::canvas::overlap::OverlapOutcome;
use crate::canvas::surface::Canvas;
use crate::foundation::core::{GlyphRng, Point};
use crate::stroke::model::Stroke;

/// A position proposed by a strategy.
#[derive(Clone, Debug)]
pub struct Candidate {
    /// Top-left corner of the stroke on the canvas.
    pub position: Point,
    /// Replacement pixels when the strategy rescaled the stroke.
    pub stroke: Option<Stroke>,
}

impl Candidate {
    pub fn at(position: Point) -> Self {
        Self {
            position,
            stroke: None,
        }
    }
}

/// Outcome of one strategy run for one stroke.
#[derive(Clone, Debug)]
pub enum SearchOutcome {
    /// A position that passed the overlap check.
    Found(Candidate),
    /// The attempt budget ran out; `fallback` is the best-effort position, if any.
    Exhausted {
        /// Position to use when the caller decides to force the stroke in.
        fallback: Option<Candidate>,
    },
    /// The stroke cannot be placed by this strategy at all and must not be forced.
    TooLarge,
}

/// A placement policy: find a position for `stroke` on the current `canvas`.
///
/// Implementations must only return [`SearchOutcome::Found`] for positions where
/// [`crate::overlaps`] is `false`, and must draw all randomness from `rng`.
pub trait PlacementStrategy {
    /// Short name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Search for a position.
    fn search(&self, canvas: &Canvas, stroke: &Stroke, rng: &mut GlyphRng) -> SearchOutcome;
}

/// Tracks the least-overlapping rejected sample of a search.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct BestEffort {
    best: Option<(Point, f64)>,
}

impl BestEffort {
    pub(crate) fn offer(&mut self, p: Point, outcome: OverlapOutcome) {
        let ratio = outcome.ratio();
        if !ratio.is_finite() {
            return;
        }
        match self.best {
            Some((_, r)) if r <= ratio => {}
            _ => self.best = Some((p, ratio)),
        }
    }

    pub(crate) fn into_candidate(self) -> Option<Candidate> {
        self.best.map(|(p, _)| Candidate::at(p))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/placement/strategy.rs"]
mod tests;
