use crate::canvas::surface::GlyphImage;
use crate::foundation::core::Point;
use crate::stroke::model::StrokeKind;

/// Which placement tier handled a stroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// One of the first, structural strokes.
    Primary,
    /// Every stroke after the primary tier.
    Secondary,
}

/// Why a stroke was left out of the composite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Zero extent or no visible ink.
    Degenerate,
    /// The strategy refused the stroke outright.
    TooLarge,
    /// The attempt budget ran out and the tier policy is to skip.
    Exhausted,
}

/// Per-stroke placement state: `Searching -> Placed | Forced | Skipped`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokeState {
    /// Not resolved yet.
    Searching,
    /// Placed at a position that passed the overlap check.
    Placed(Point),
    /// Placed at a best-effort position after exhausting the search.
    Forced(Point),
    /// Excluded from the composite.
    Skipped(SkipReason),
}

impl StrokeState {
    /// Position of the stroke on the canvas, if it was composited.
    pub fn position(self) -> Option<Point> {
        match self {
            Self::Placed(p) | Self::Forced(p) => Some(p),
            Self::Searching | Self::Skipped(_) => None,
        }
    }
}

/// How an exhausted search was resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    Forced,
    Skipped,
}

/// Non-fatal conditions met while composing. None of these abort a composition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Anomaly {
    /// No strokes were submitted; the result is an empty canvas.
    EmptyStrokeSet,
    /// A zero-area or ink-free stroke was skipped.
    DegenerateStroke {
        /// Input index of the stroke.
        index: usize,
    },
    /// A strategy ran out of attempts.
    PlacementExhausted {
        /// Input index of the stroke.
        index: usize,
        /// What the tier policy did about it.
        resolution: Resolution,
    },
    /// A strategy declared the stroke too large to place.
    TooLarge {
        /// Input index of the stroke.
        index: usize,
    },
}

/// Placement decision for one input stroke.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StrokeRecord {
    /// Position of the stroke in the submitted input.
    pub index: usize,
    pub kind: StrokeKind,
    /// Importance relative to the canvas.
    pub importance: f64,
    /// `None` for degenerate strokes, which never reach a tier.
    pub tier: Option<Tier>,
    /// Name of the strategy that produced the decision.
    pub strategy: Option<&'static str>,
    pub state: StrokeState,
    /// Grid cell containing the placed position.
    pub region: Option<usize>,
    /// Extent of the composited pixels, which differs from the input after a boundary fit.
    pub placed_size: Option<(u32, u32)>,
}

/// Finalized output of one composition run.
#[derive(Clone, Debug)]
pub struct ComposedGlyph {
    /// Opaque RGB8 raster.
    pub image: GlyphImage,
    /// Fraction of canvas pixels carrying ink, in `[0, 1]`.
    pub coverage: f64,
    /// One record per submitted stroke, in placement order.
    pub strokes: Vec<StrokeRecord>,
    pub anomalies: Vec<Anomaly>,
    /// Seed that reproduces this run.
    pub seed: u64,
}

impl ComposedGlyph {
    /// Strokes placed without forcing.
    pub fn placed_count(&self) -> usize {
        self.count(|s| matches!(s, StrokeState::Placed(_)))
    }

    /// Strokes placed through the forced fallback.
    pub fn forced_count(&self) -> usize {
        self.count(|s| matches!(s, StrokeState::Forced(_)))
    }

    /// Strokes left out for any reason.
    pub fn skipped_count(&self) -> usize {
        self.count(|s| matches!(s, StrokeState::Skipped(_)))
    }

    /// Usable strokes the strategies could not place (degenerate input is not a failure).
    pub fn failure_count(&self) -> usize {
        self.count(|s| {
            matches!(
                s,
                StrokeState::Skipped(SkipReason::Exhausted | SkipReason::TooLarge)
            )
        })
    }

    /// `true` when nothing was composited.
    pub fn is_empty(&self) -> bool {
        self.placed_count() + self.forced_count() == 0
    }

    /// Record for input stroke `index`.
    pub fn record(&self, index: usize) -> Option<&StrokeRecord> {
        self.strokes.iter().find(|r| r.index == index)
    }

    fn count(&self, pred: impl Fn(StrokeState) -> bool) -> usize {
        self.strokes.iter().filter(|r| pred(r.state)).count()
    }
}
