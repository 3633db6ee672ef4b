use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::canvas::occupancy::OccupancyPredicate;
use crate::canvas::overlap::OverlapRule;
use crate::canvas::surface::BackgroundPolicy;
use crate::compose::ordering::StrokeOrdering;
use crate::foundation::error::{GlyphError, GlyphResult};
use crate::stroke::model::VISIBLE_ALPHA_FLOOR;

/// What to do with a stroke whose strategy ran out of attempts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExhaustionPolicy {
    /// Place it at the strategy's best-effort position, ignoring the overlap check.
    Force,
    /// Leave it out of the composite.
    #[default]
    Skip,
}

/// Strategy used for the first, structural strokes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryStrategy {
    /// Region search restricted to the centre grid cell.
    #[default]
    CenterRegion,
    /// Rescale and pin to the canvas corners, one corner per primary stroke.
    BoundaryAnchored,
    /// Centre-attraction search.
    CenterAttraction,
}

impl PrimaryStrategy {
    /// Exhaustion policy used when the tier does not set one.
    ///
    /// Boundary anchoring is a forced fit: it always lands at its canonical position.
    pub fn default_exhaustion(self) -> ExhaustionPolicy {
        match self {
            Self::BoundaryAnchored => ExhaustionPolicy::Force,
            Self::CenterRegion | Self::CenterAttraction => ExhaustionPolicy::Skip,
        }
    }
}

/// Strategy used for every stroke after the primary tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecondaryStrategy {
    /// Region search over occupancy-weighted grid cells.
    #[default]
    RegionSearch,
    /// Centre-attraction search.
    CenterAttraction,
}

/// Primary tier settings.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrimaryTier {
    /// Number of highest-priority strokes placed with the primary strategy.
    pub count: usize,
    pub strategy: PrimaryStrategy,
    /// Overrides [`PrimaryStrategy::default_exhaustion`] when set.
    pub on_exhausted: Option<ExhaustionPolicy>,
}

impl Default for PrimaryTier {
    fn default() -> Self {
        Self {
            count: 2,
            strategy: PrimaryStrategy::CenterRegion,
            on_exhausted: None,
        }
    }
}

impl PrimaryTier {
    /// Policy applied when the primary strategy runs out of attempts.
    pub fn exhaustion_policy(&self) -> ExhaustionPolicy {
        self.on_exhausted.unwrap_or_else(|| self.strategy.default_exhaustion())
    }
}

/// Secondary tier settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SecondaryTier {
    pub strategy: SecondaryStrategy,
    pub on_exhausted: ExhaustionPolicy,
}

/// Region search tuning.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegionSearchConfig {
    /// Largest tolerated overlap ratio.
    pub threshold: f64,
    /// Samples per region and for the whole-canvas fallback pass.
    pub attempts: u32,
    /// Grid cells drawn (with replacement) per secondary stroke.
    pub regions_per_stroke: usize,
}

impl Default for RegionSearchConfig {
    fn default() -> Self {
        Self {
            threshold: 0.05,
            attempts: 50,
            regions_per_stroke: 3,
        }
    }
}

/// Centre-attraction tuning.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CenterAttractionConfig {
    pub threshold: f64,
    pub attempts: u32,
    /// Pull toward the centre reached on the last attempt.
    pub max_pull: f64,
}

impl Default for CenterAttractionConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            attempts: 100,
            max_pull: 0.8,
        }
    }
}

/// Boundary-anchored fit tuning.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoundaryConfig {
    pub threshold: f64,
    pub attempts: u32,
    /// Jitter bound on the unconstrained axis, as a fraction of the larger canvas side.
    pub max_jitter_ratio: f64,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            attempts: 10,
            max_jitter_ratio: 0.1,
        }
    }
}

/// Full composition policy. Every field has a default, so partial JSON documents are valid.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComposeConfig {
    /// Seed for the composition's random source; drawn from entropy when absent.
    pub seed: Option<u64>,
    pub background: BackgroundPolicy,
    /// Opaque colour the result is flattened onto.
    pub background_rgb: [u8; 3],
    /// Canvas-side ink test, shared by the overlap check and coverage.
    pub occupancy: OccupancyPredicate,
    /// Stroke pixels with alpha at or below this are not ink.
    pub stroke_floor: u8,
    pub ordering: StrokeOrdering,
    pub primary: PrimaryTier,
    pub secondary: SecondaryTier,
    pub region_search: RegionSearchConfig,
    pub center_attraction: CenterAttractionConfig,
    pub boundary: BoundaryConfig,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            seed: None,
            background: BackgroundPolicy::Deferred,
            background_rgb: [0, 0, 0],
            occupancy: OccupancyPredicate::default(),
            stroke_floor: VISIBLE_ALPHA_FLOOR,
            ordering: StrokeOrdering::Importance,
            primary: PrimaryTier::default(),
            secondary: SecondaryTier::default(),
            region_search: RegionSearchConfig::default(),
            center_attraction: CenterAttractionConfig::default(),
            boundary: BoundaryConfig::default(),
        }
    }
}

impl ComposeConfig {
    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> GlyphResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| GlyphError::validation(format!("parse compose config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> GlyphResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            GlyphError::validation(format!("open compose config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Same policy with every strategy threshold set to `threshold`.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.region_search.threshold = threshold;
        self.center_attraction.threshold = threshold;
        self.boundary.threshold = threshold;
        self
    }

    /// Same policy with a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check ranges that serde cannot express.
    pub fn validate(&self) -> GlyphResult<()> {
        check_unit("region_search.threshold", self.region_search.threshold)?;
        check_unit("center_attraction.threshold", self.center_attraction.threshold)?;
        check_unit("boundary.threshold", self.boundary.threshold)?;
        check_unit("center_attraction.max_pull", self.center_attraction.max_pull)?;
        check_unit("boundary.max_jitter_ratio", self.boundary.max_jitter_ratio)?;
        check_attempts("region_search.attempts", self.region_search.attempts)?;
        check_attempts("center_attraction.attempts", self.center_attraction.attempts)?;
        check_attempts("boundary.attempts", self.boundary.attempts)?;
        if self.region_search.regions_per_stroke == 0 {
            return Err(GlyphError::validation(
                "region_search.regions_per_stroke must be >= 1",
            ));
        }
        // An opaque canvas starts out fully painted; the predicate must not see that as ink.
        let [r, g, b] = self.background_rgb;
        let opaque = self.background == BackgroundPolicy::Opaque;
        if opaque && self.occupancy.is_occupied([r, g, b, 255]) {
            return Err(GlyphError::validation(format!(
                "occupancy {:?} treats the opaque background {:?} as ink; \
                 use a colour predicate above the background",
                self.occupancy, self.background_rgb
            )));
        }
        Ok(())
    }

    pub(crate) fn rule(&self, threshold: f64) -> OverlapRule {
        OverlapRule {
            threshold,
            stroke_floor: self.stroke_floor,
            occupancy: self.occupancy,
        }
    }
}

fn check_unit(name: &str, v: f64) -> GlyphResult<()> {
    if !v.is_finite() || !(0.0..=1.0).contains(&v) {
        return Err(GlyphError::validation(format!(
            "{name} must be within [0, 1], got {v}"
        )));
    }
    Ok(())
}

fn check_attempts(name: &str, v: u32) -> GlyphResult<()> {
    if v == 0 {
        return Err(GlyphError::validation(format!("{name} must be >= 1")));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/compose/config.rs"]
mod tests;
