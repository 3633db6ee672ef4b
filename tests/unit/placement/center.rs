use rand::SeedableRng;

use super::*;
use crate::foundation::core::CanvasSize;

fn canvas(w: u32, h: u32) -> Canvas {
    Canvas::transparent(CanvasSize::new(w, h).unwrap())
}

fn ink(w: u32, h: u32) -> Stroke {
    Stroke::filled(w, h, [255, 255, 255, 255])
}

fn strategy(attempts: u32) -> CenterAttraction {
    CenterAttraction {
        attempts,
        max_pull: 0.8,
        rule: OverlapRule::with_threshold(0.1),
    }
}

#[test]
fn pull_grows_linearly_to_max() {
    let s = strategy(5);
    assert_eq!(s.pull_at(0), 0.0);
    assert!((s.pull_at(2) - 0.4).abs() < 1e-12);
    assert!((s.pull_at(4) - 0.8).abs() < 1e-12);
    assert_eq!(strategy(1).pull_at(0), 0.0);
}

#[test]
fn stroke_larger_than_canvas_is_too_large() {
    let c = canvas(200, 200);
    let mut rng = GlyphRng::seed_from_u64(42);
    assert!(matches!(
        strategy(100).search(&c, &ink(300, 300), &mut rng),
        SearchOutcome::TooLarge
    ));
}

#[test]
fn stroke_matching_one_canvas_dimension_is_too_large() {
    let c = canvas(200, 200);
    let mut rng = GlyphRng::seed_from_u64(42);
    assert!(matches!(
        strategy(100).search(&c, &ink(200, 10), &mut rng),
        SearchOutcome::TooLarge
    ));
}

#[test]
fn found_position_stays_on_canvas() {
    let c = canvas(200, 200);
    let mut rng = GlyphRng::seed_from_u64(42);
    let SearchOutcome::Found(cand) = strategy(100).search(&c, &ink(40, 40), &mut rng) else {
        panic!("expected a position");
    };
    assert!((0..=160).contains(&cand.position.x));
    assert!((0..=160).contains(&cand.position.y));
}

#[test]
fn late_attempts_converge_on_centre() {
    // A single free spot in the middle: only strongly pulled samples can find it.
    let mut c = canvas(100, 100);
    c.composite(&ink(100, 40), Point::new(0, 0));
    c.composite(&ink(100, 40), Point::new(0, 60));
    c.composite(&ink(40, 20), Point::new(0, 40));
    c.composite(&ink(40, 20), Point::new(60, 40));
    let s = CenterAttraction {
        attempts: 200,
        max_pull: 1.0,
        rule: OverlapRule::with_threshold(0.0),
    };
    let mut rng = GlyphRng::seed_from_u64(3);
    let SearchOutcome::Found(cand) = s.search(&c, &ink(20, 20), &mut rng) else {
        panic!("expected a position");
    };
    assert_eq!(cand.position, Point::new(40, 40));
}

#[test]
fn exhausted_search_offers_fallback() {
    let mut c = canvas(60, 60);
    c.composite(&ink(60, 60), Point::ORIGIN);
    let mut rng = GlyphRng::seed_from_u64(5);
    match strategy(10).search(&c, &ink(10, 10), &mut rng) {
        SearchOutcome::Exhausted { fallback: Some(cand) } => {
            assert!((0..=50).contains(&cand.position.x));
        }
        other => panic!("unexpected outcome {other:?}"),
    }
}
