//! Glyphweave synthesizes composite glyph images from rasterized stroke fragments.
//!
//! A composition places each stroke on a shared canvas so that it stays legible: candidate
//! positions are accepted only while the stroke's ink barely coincides with ink that is
//! already there. The result is an opaque raster plus a report of every placement decision.
//!
//! # Pipeline overview
//!
//! 1. **Load**: decode stroke images into [`Stroke`] values (optionally tone-clamped).
//! 2. **Order**: rank strokes by importance and split them into a primary and a secondary tier.
//! 3. **Place**: run one [`PlacementStrategy`] per stroke against the live canvas.
//! 4. **Finalize**: flatten to RGB8 and measure coverage into a [`ComposedGlyph`].
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Reproducible**: all randomness flows from one seeded generator per composition.
//! - **Premultiplied RGBA8** for strokes and the working canvas.
//! - A single bad stroke never fails a composition; it is reported as an [`Anomaly`].
#![forbid(unsafe_code)]

mod assets;
mod canvas;
mod compose;
mod foundation;
mod layout;
mod placement;
mod stroke;

pub use assets::decode::{decode_stroke, load_stroke, probe_canvas_size, save_glyph};
pub use assets::subject::{LoadOptions, Subject, list_subjects, load_subject, subject_seed};
pub use canvas::composite::{PremulRgba8, flatten_onto, over};
pub use canvas::occupancy::OccupancyPredicate;
pub use canvas::overlap::{OverlapOutcome, OverlapRule, evaluate, overlaps};
pub use canvas::surface::{BackgroundPolicy, Canvas, GlyphImage};
pub use compose::composer::{Composer, Phase, compose};
pub use compose::config::{
    BoundaryConfig, CenterAttractionConfig, ComposeConfig, ExhaustionPolicy, PrimaryStrategy,
    PrimaryTier, RegionSearchConfig, SecondaryStrategy, SecondaryTier,
};
pub use compose::ordering::StrokeOrdering;
pub use compose::report::{
    Anomaly, ComposedGlyph, Resolution, SkipReason, StrokeRecord, StrokeState, Tier,
};
pub use foundation::core::{CanvasSize, GlyphRng, IRect, Point};
pub use foundation::error::{GlyphError, GlyphResult};
pub use layout::regions::{
    Anchor, CENTER_REGION, GRID_ARITY, HorizontalEdge, RegionOccupancy, VerticalEdge,
    boundary_anchors, grid_regions, region_containing,
};
pub use placement::boundary::{
    BoundaryAnchor, MAX_FIT_OVERSHOOT, anchored_position, fit_to_anchor,
};
pub use placement::center::CenterAttraction;
pub use placement::region_search::RegionSearch;
pub use placement::strategy::{Candidate, PlacementStrategy, SearchOutcome};
pub use stroke::model::{Stroke, StrokeKind, VISIBLE_ALPHA_FLOOR, classify, importance};
pub use stroke::tone::ToneClamp;
