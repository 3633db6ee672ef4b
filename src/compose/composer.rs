use rand::SeedableRng;

use crate::canvas::surface::Canvas;
use crate::compose::config::{
    ComposeConfig, ExhaustionPolicy, PrimaryStrategy, SecondaryStrategy,
};
use crate::compose::ordering::order_strokes;
use crate::compose::report::{
    Anomaly, ComposedGlyph, Resolution, SkipReason, StrokeRecord, StrokeState, Tier,
};
use crate::foundation::core::{CanvasSize, GlyphRng, IRect, Point, to_i32};
use crate::foundation::error::GlyphResult;
use crate::layout::regions::{
    CENTER_REGION, RegionOccupancy, boundary_anchors, grid_regions, region_containing,
};
use crate::placement::boundary::BoundaryAnchor;
use crate::placement::center::CenterAttraction;
use crate::placement::region_search::RegionSearch;
use crate::placement::strategy::{Candidate, PlacementStrategy, SearchOutcome};
use crate::stroke::model::Stroke;

/// Lifecycle of a [`Composer`]. Finalizing consumes the composer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Canvas allocated, nothing submitted yet.
    Empty,
    /// At least one batch of strokes was placed.
    Populating,
}

/// Places strokes one by one on a single canvas.
///
/// Placements are applied in a fixed order, and every overlap test sees all previously
/// accepted strokes. All randomness comes from one generator seeded at construction.
#[derive(Debug)]
pub struct Composer {
    config: ComposeConfig,
    canvas: Canvas,
    regions: Vec<IRect>,
    occupancy: RegionOccupancy,
    rng: GlyphRng,
    seed: u64,
    phase: Phase,
    submitted: usize,
    usable: usize,
    primaries_used: usize,
    records: Vec<StrokeRecord>,
    anomalies: Vec<Anomaly>,
}

impl Composer {
    /// Validate `config` and allocate the canvas.
    pub fn new(size: CanvasSize, config: ComposeConfig) -> GlyphResult<Self> {
        let size = CanvasSize::new(size.width, size.height)?;
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let regions = grid_regions(size);
        Ok(Self {
            canvas: Canvas::new(size, config.background, config.background_rgb),
            occupancy: RegionOccupancy::new(regions.len()),
            regions,
            rng: GlyphRng::seed_from_u64(seed),
            seed,
            phase: Phase::Empty,
            submitted: 0,
            usable: 0,
            primaries_used: 0,
            records: Vec::new(),
            anomalies: Vec::new(),
            config,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Seed of this run's random source.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Current working buffer.
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Per-region placement counts so far.
    pub fn region_counts(&self) -> &[u32] {
        self.occupancy.counts()
    }

    /// Order and place a batch of strokes.
    ///
    /// Primary slots left over from earlier batches are filled first. Record indices continue
    /// across batches.
    #[tracing::instrument(skip_all, fields(strokes = strokes.len(), seed = self.seed))]
    pub fn populate(&mut self, strokes: &[Stroke]) {
        self.phase = Phase::Populating;

        let size = self.canvas.size();
        let base = self.submitted;
        self.submitted += strokes.len();

        let order = order_strokes(strokes, size, self.config.ordering, &mut self.rng);
        for local in order {
            let stroke = &strokes[local];
            let index = base + local;
            let record = if stroke.is_degenerate() {
                self.anomalies.push(Anomaly::DegenerateStroke { index });
                StrokeRecord {
                    index,
                    kind: stroke.kind(),
                    importance: stroke.importance(size),
                    tier: None,
                    strategy: None,
                    state: StrokeState::Skipped(SkipReason::Degenerate),
                    region: None,
                    placed_size: None,
                }
            } else {
                self.usable += 1;
                self.place_one(index, stroke)
            };
            tracing::debug!(
                index,
                tier = ?record.tier,
                strategy = record.strategy,
                state = ?record.state,
                "stroke resolved"
            );
            self.records.push(record);
        }
    }

    /// Flatten the canvas, measure coverage and hand out the result.
    ///
    /// Reports [`Anomaly::EmptyStrokeSet`] when no usable stroke was ever submitted.
    #[tracing::instrument(skip_all, fields(seed = self.seed))]
    pub fn finalize(mut self) -> ComposedGlyph {
        if self.usable == 0 {
            self.anomalies.push(Anomaly::EmptyStrokeSet);
        }

        // Measured before flattening so an opaque background is not mistaken for ink.
        let coverage = self.canvas.coverage(self.config.occupancy);
        let out = ComposedGlyph {
            image: self.canvas.flatten(),
            coverage,
            strokes: self.records,
            anomalies: self.anomalies,
            seed: self.seed,
        };
        tracing::info!(
            strokes = out.strokes.len(),
            placed = out.placed_count(),
            forced = out.forced_count(),
            skipped = out.skipped_count(),
            coverage = out.coverage,
            "composition finalized"
        );
        out
    }

    fn place_one(&mut self, index: usize, stroke: &Stroke) -> StrokeRecord {
        let size = self.canvas.size();
        let tier = if self.primaries_used < self.config.primary.count {
            self.primaries_used += 1;
            Tier::Primary
        } else {
            Tier::Secondary
        };
        let (strategy, policy) = self.strategy_for(tier);

        let mut record = StrokeRecord {
            index,
            kind: stroke.kind(),
            importance: stroke.importance(size),
            tier: Some(tier),
            strategy: Some(strategy.name()),
            state: StrokeState::Searching,
            region: None,
            placed_size: None,
        };

        let outcome = strategy.search(&self.canvas, stroke, &mut self.rng);
        record.state = match outcome {
            SearchOutcome::Found(candidate) => {
                let p = self.commit(stroke, candidate, &mut record);
                StrokeState::Placed(p)
            }
            SearchOutcome::Exhausted { fallback } => match policy {
                ExhaustionPolicy::Force => {
                    self.anomalies.push(Anomaly::PlacementExhausted {
                        index,
                        resolution: Resolution::Forced,
                    });
                    let candidate =
                        fallback.unwrap_or_else(|| Candidate::at(centred(stroke, size)));
                    let p = self.commit(stroke, candidate, &mut record);
                    StrokeState::Forced(p)
                }
                ExhaustionPolicy::Skip => {
                    self.anomalies.push(Anomaly::PlacementExhausted {
                        index,
                        resolution: Resolution::Skipped,
                    });
                    StrokeState::Skipped(SkipReason::Exhausted)
                }
            },
            SearchOutcome::TooLarge => {
                self.anomalies.push(Anomaly::TooLarge { index });
                StrokeState::Skipped(SkipReason::TooLarge)
            }
        };
        record
    }

    fn strategy_for(&mut self, tier: Tier) -> (Box<dyn PlacementStrategy>, ExhaustionPolicy) {
        let cfg = &self.config;
        match tier {
            Tier::Primary => {
                let strategy: Box<dyn PlacementStrategy> = match cfg.primary.strategy {
                    PrimaryStrategy::CenterRegion => Box::new(RegionSearch {
                        regions: vec![self.regions[CENTER_REGION]],
                        attempts: cfg.region_search.attempts,
                        rule: cfg.rule(cfg.region_search.threshold),
                    }),
                    PrimaryStrategy::BoundaryAnchored => {
                        let anchors = boundary_anchors();
                        let size = self.canvas.size();
                        let longest = f64::from(size.width.max(size.height));
                        Box::new(BoundaryAnchor {
                            anchor: anchors[(self.primaries_used - 1) % anchors.len()],
                            attempts: cfg.boundary.attempts,
                            max_jitter: (longest * cfg.boundary.max_jitter_ratio).round() as u32,
                            rule: cfg.rule(cfg.boundary.threshold),
                        })
                    }
                    PrimaryStrategy::CenterAttraction => Box::new(self.center_attraction()),
                };
                (strategy, cfg.primary.exhaustion_policy())
            }
            Tier::Secondary => {
                let strategy: Box<dyn PlacementStrategy> = match cfg.secondary.strategy {
                    SecondaryStrategy::RegionSearch => {
                        let picks = self
                            .occupancy
                            .sample(cfg.region_search.regions_per_stroke, &mut self.rng);
                        Box::new(RegionSearch {
                            regions: picks.into_iter().map(|i| self.regions[i]).collect(),
                            attempts: cfg.region_search.attempts,
                            rule: cfg.rule(cfg.region_search.threshold),
                        })
                    }
                    SecondaryStrategy::CenterAttraction => Box::new(self.center_attraction()),
                };
                (strategy, cfg.secondary.on_exhausted)
            }
        }
    }

    fn center_attraction(&self) -> CenterAttraction {
        let cfg = &self.config.center_attraction;
        CenterAttraction {
            attempts: cfg.attempts,
            max_pull: cfg.max_pull,
            rule: self.config.rule(cfg.threshold),
        }
    }

    fn commit(
        &mut self,
        original: &Stroke,
        candidate: Candidate,
        record: &mut StrokeRecord,
    ) -> Point {
        let Candidate { position, stroke } = candidate;
        let pixels = stroke.as_ref().unwrap_or(original);
        self.canvas.composite(pixels, position);

        // Off-canvas origins (oversized boundary fits) are booked in the nearest cell.
        let size = self.canvas.size();
        let probe = Point::new(
            position.x.clamp(0, to_i32(size.width)),
            position.y.clamp(0, to_i32(size.height)),
        );
        let region = region_containing(&self.regions, probe);
        if let Some(idx) = region {
            self.occupancy.record(idx);
        }
        record.region = region;
        record.placed_size = Some((pixels.width(), pixels.height()));
        position
    }
}

fn centred(stroke: &Stroke, size: CanvasSize) -> Point {
    Point::new(
        (to_i32(size.width) - to_i32(stroke.width())) / 2,
        (to_i32(size.height) - to_i32(stroke.height())) / 2,
    )
}

/// Compose `strokes` on a fresh canvas in one call.
pub fn compose(
    size: CanvasSize,
    strokes: &[Stroke],
    config: &ComposeConfig,
) -> GlyphResult<ComposedGlyph> {
    let mut composer = Composer::new(size, config.clone())?;
    composer.populate(strokes);
    Ok(composer.finalize())
}

#[cfg(test)]
#[path = "../../tests/unit/compose/composer.rs"]
mod tests;
