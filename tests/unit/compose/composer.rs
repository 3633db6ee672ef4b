use super::*;
use crate::canvas::occupancy::OccupancyPredicate;
use crate::canvas::surface::BackgroundPolicy;
use crate::compose::config::PrimaryTier;
use crate::foundation::error::GlyphError;

fn ink(w: u32, h: u32) -> Stroke {
    Stroke::filled(w, h, [255, 255, 255, 255])
}

fn size(w: u32, h: u32) -> CanvasSize {
    CanvasSize::new(w, h).unwrap()
}

fn seeded() -> ComposeConfig {
    ComposeConfig::default().with_seed(42).with_threshold(0.1)
}

#[test]
fn phases_advance_until_finalize() {
    let mut c = Composer::new(size(100, 100), seeded()).unwrap();
    assert_eq!(c.phase(), Phase::Empty);
    c.populate(&[ink(10, 10)]);
    assert_eq!(c.phase(), Phase::Populating);
    c.populate(&[ink(10, 10)]);
    assert_eq!(c.phase(), Phase::Populating);
    let out = c.finalize();
    assert_eq!(out.strokes.len(), 2);
}

#[test]
fn invalid_config_is_rejected_up_front() {
    let mut cfg = seeded();
    cfg.region_search.attempts = 0;
    assert!(Composer::new(size(100, 100), cfg).is_err());
    let zero = CanvasSize {
        width: 0,
        height: 10,
    };
    assert!(Composer::new(zero, seeded()).is_err());
}

#[test]
fn empty_input_reports_empty_stroke_set() {
    let out = compose(size(200, 200), &[], &seeded()).unwrap();
    assert_eq!(out.coverage, 0.0);
    assert!(out.is_empty());
    assert_eq!(out.anomalies, vec![Anomaly::EmptyStrokeSet]);
    assert!(out.image.data.iter().all(|&b| b == 0));
}

#[test]
fn degenerate_strokes_are_skipped_without_using_primary_slots() {
    let strokes = vec![Stroke::filled(30, 30, [255, 255, 255, 0]), ink(20, 20)];
    let out = compose(size(200, 200), &strokes, &seeded()).unwrap();
    let empty = out.record(0).unwrap();
    assert_eq!(empty.state, StrokeState::Skipped(SkipReason::Degenerate));
    assert_eq!(empty.tier, None);
    assert!(out.anomalies.contains(&Anomaly::DegenerateStroke { index: 0 }));

    let real = out.record(1).unwrap();
    assert_eq!(real.tier, Some(Tier::Primary));
    assert!(matches!(real.state, StrokeState::Placed(_)));
    assert_eq!(out.failure_count(), 0);
    assert!(!out.anomalies.contains(&Anomaly::EmptyStrokeSet));
}

#[test]
fn only_degenerate_strokes_count_as_an_empty_set() {
    let strokes = vec![
        Stroke::filled(30, 30, [255, 255, 255, 0]),
        Stroke::filled(0, 4, [255; 4]),
    ];
    let out = compose(size(100, 100), &strokes, &seeded()).unwrap();
    assert_eq!(out.skipped_count(), 2);
    assert_eq!(out.coverage, 0.0);
    assert_eq!(
        out.anomalies,
        vec![
            Anomaly::DegenerateStroke { index: 0 },
            Anomaly::DegenerateStroke { index: 1 },
            Anomaly::EmptyStrokeSet,
        ]
    );
}

#[test]
fn primary_tier_covers_first_strokes_only() {
    let strokes = vec![ink(30, 10), ink(10, 30), ink(12, 12), ink(8, 8)];
    let out = compose(size(200, 200), &strokes, &seeded()).unwrap();
    let tiers: Vec<Option<Tier>> = out.strokes.iter().map(|r| r.tier).collect();
    assert_eq!(
        tiers,
        vec![
            Some(Tier::Primary),
            Some(Tier::Primary),
            Some(Tier::Secondary),
            Some(Tier::Secondary)
        ]
    );
    assert_eq!(out.strokes[0].strategy, Some("region_search"));
}

#[test]
fn accepted_placements_update_region_counts() {
    let mut c = Composer::new(size(200, 200), seeded()).unwrap();
    c.populate(&[ink(20, 20), ink(20, 20), ink(20, 20)]);
    let placed: u32 = c.region_counts().iter().sum();
    assert_eq!(placed, 3);
    let out = c.finalize();
    assert!(out.strokes.iter().all(|r| r.region.is_some()));
}

#[test]
fn boundary_primaries_are_pinned_to_corners() {
    let mut cfg = seeded();
    cfg.primary = PrimaryTier {
        count: 4,
        strategy: PrimaryStrategy::BoundaryAnchored,
        on_exhausted: Some(ExhaustionPolicy::Force),
    };
    let strokes = vec![ink(300, 300), ink(40, 40), ink(30, 30), ink(20, 20)];
    let out = compose(size(200, 200), &strokes, &cfg).unwrap();
    assert_eq!(out.skipped_count(), 0);
    for r in &out.strokes {
        assert_eq!(r.strategy, Some("boundary_anchor"));
        let (w, h) = r.placed_size.unwrap();
        assert_eq!((w, h), (200, 200));
        assert_eq!(r.state.position(), Some(Point::ORIGIN));
    }
    // Corner fits cover the whole canvas, so later ones are forced in.
    assert!(out.forced_count() >= 3);
    assert_eq!(out.coverage, 1.0);
}

#[test]
fn boundary_primaries_force_by_default() {
    let mut cfg = seeded();
    cfg.primary.count = 4;
    cfg.primary.strategy = PrimaryStrategy::BoundaryAnchored;
    let strokes = vec![ink(40, 40), ink(30, 30), ink(20, 20), ink(10, 10)];
    let out = compose(size(200, 200), &strokes, &cfg).unwrap();

    assert_eq!(out.skipped_count(), 0);
    assert_eq!(out.placed_count(), 1);
    assert_eq!(out.forced_count(), 3);
    assert!(
        out.strokes
            .iter()
            .all(|r| r.state.position() == Some(Point::ORIGIN))
    );
    let forced = out
        .anomalies
        .iter()
        .filter(|a| {
            matches!(
                a,
                Anomaly::PlacementExhausted {
                    resolution: Resolution::Forced,
                    ..
                }
            )
        })
        .count();
    assert_eq!(forced, 3);
}

#[test]
fn exhausted_secondary_strokes_follow_tier_policy() {
    let full = ink(100, 100);
    let extra = ink(10, 10);

    let mut skip = seeded();
    skip.primary.count = 1;
    skip.primary.on_exhausted = Some(ExhaustionPolicy::Force);
    let out = compose(size(100, 100), &[full.clone(), extra.clone()], &skip).unwrap();
    assert_eq!(
        out.record(1).unwrap().state,
        StrokeState::Skipped(SkipReason::Exhausted)
    );
    assert!(out.anomalies.contains(&Anomaly::PlacementExhausted {
        index: 1,
        resolution: Resolution::Skipped
    }));

    let mut force = skip.clone();
    force.secondary.on_exhausted = ExhaustionPolicy::Force;
    let out = compose(size(100, 100), &[full, extra], &force).unwrap();
    assert!(matches!(out.record(1).unwrap().state, StrokeState::Forced(_)));
    assert_eq!(out.failure_count(), 0);
}

#[test]
fn center_attraction_never_forces_too_large_strokes() {
    let mut cfg = seeded();
    cfg.primary.strategy = PrimaryStrategy::CenterAttraction;
    cfg.primary.on_exhausted = Some(ExhaustionPolicy::Force);
    let out = compose(size(200, 200), &[ink(300, 300)], &cfg).unwrap();
    assert_eq!(
        out.record(0).unwrap().state,
        StrokeState::Skipped(SkipReason::TooLarge)
    );
    assert_eq!(out.anomalies, vec![Anomaly::TooLarge { index: 0 }]);
    assert_eq!(out.coverage, 0.0);
}

#[test]
fn batches_continue_indices_and_primary_slots() {
    let mut c = Composer::new(size(200, 200), seeded()).unwrap();
    c.populate(&[ink(20, 20)]);
    c.populate(&[ink(20, 20), ink(20, 20)]);
    let out = c.finalize();
    let indices: Vec<usize> = out.strokes.iter().map(|r| r.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
    assert_eq!(out.strokes[1].tier, Some(Tier::Primary));
    assert_eq!(out.strokes[2].tier, Some(Tier::Secondary));
}

#[test]
fn opaque_background_with_colour_predicate_measures_strokes_only() {
    let mut cfg = seeded();
    cfg.background = BackgroundPolicy::Opaque;
    cfg.occupancy = OccupancyPredicate::NonBlack { min_sum: 30 };
    let out = compose(size(100, 100), &[ink(10, 10)], &cfg).unwrap();
    assert!((out.coverage - 0.01).abs() < 1e-12);
}

#[test]
fn opaque_background_with_alpha_predicate_is_rejected() {
    let mut cfg = seeded();
    cfg.background = BackgroundPolicy::Opaque;
    let err = Composer::new(size(200, 200), cfg).unwrap_err();
    assert!(matches!(err, GlyphError::Validation(_)));
}

#[test]
fn unseeded_runs_report_their_seed() {
    let cfg = ComposeConfig::default();
    let out = compose(size(50, 50), &[ink(5, 5)], &cfg).unwrap();
    let again = compose(size(50, 50), &[ink(5, 5)], &cfg.clone().with_seed(out.seed)).unwrap();
    assert_eq!(out.image, again.image);
}
