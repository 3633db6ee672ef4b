use rand::SeedableRng;

use super::*;
use crate::layout::regions::boundary_anchors;

fn size(w: u32, h: u32) -> CanvasSize {
    CanvasSize::new(w, h).unwrap()
}

fn ink(w: u32, h: u32) -> Stroke {
    Stroke::filled(w, h, [255, 255, 255, 255])
}

fn strategy(anchor: Anchor) -> BoundaryAnchor {
    BoundaryAnchor {
        anchor,
        attempts: 10,
        max_jitter: 20,
        rule: OverlapRule::with_threshold(0.1),
    }
}

#[test]
fn single_horizontal_edge_stretches_width_only() {
    let fitted = fit_to_anchor(&ink(40, 30), size(200, 100), Anchor::left());
    assert_eq!((fitted.width(), fitted.height()), (200, 30));
}

#[test]
fn single_vertical_edge_stretches_height_only() {
    let fitted = fit_to_anchor(&ink(40, 30), size(200, 100), Anchor::bottom());
    assert_eq!((fitted.width(), fitted.height()), (40, 100));
}

#[test]
fn corner_anchor_uses_max_scale() {
    // sx = 5, sy = 2.5 -> uniform scale 5.
    let fitted = fit_to_anchor(&ink(40, 40), size(200, 100), boundary_anchors()[0]);
    assert_eq!((fitted.width(), fitted.height()), (200, 200));
}

#[test]
fn corner_fit_of_thin_stroke_is_capped() {
    // Uniform scale 200 would make this 200 x 20000.
    let canvas = size(200, 200);
    let fitted = fit_to_anchor(&ink(1, 100), canvas, boundary_anchors()[3]);
    assert_eq!((fitted.width(), fitted.height()), (200, 200 * MAX_FIT_OVERSHOOT));

    let p = anchored_position(fitted.width(), fitted.height(), canvas, boundary_anchors()[3]);
    assert_eq!(p.x + fitted.width() as i32, 200);
    assert_eq!(p.y + fitted.height() as i32, 200);
}

#[test]
fn anchored_positions_touch_edges() {
    let canvas = size(200, 200);
    let [lt, rt, lb, rb] = boundary_anchors();
    assert_eq!(anchored_position(200, 200, canvas, lt), Point::new(0, 0));
    assert_eq!(anchored_position(200, 250, canvas, rt), Point::new(0, 0));
    assert_eq!(anchored_position(250, 200, canvas, lb), Point::new(0, 0));
    assert_eq!(anchored_position(250, 200, canvas, rb), Point::new(-50, 0));
    assert_eq!(anchored_position(200, 40, canvas, Anchor::left()), Point::new(0, 80));
}

#[test]
fn left_top_anchor_lands_at_origin() {
    let canvas = Canvas::transparent(size(200, 200));
    let mut rng = GlyphRng::seed_from_u64(42);
    let outcome = strategy(boundary_anchors()[0]).search(&canvas, &ink(50, 80), &mut rng);
    let SearchOutcome::Found(cand) = outcome else {
        panic!("expected a position");
    };
    assert_eq!(cand.position, Point::new(0, 0));
    let fitted = cand.stroke.unwrap();
    assert!(fitted.width() >= 200 && fitted.height() >= 200);
}

#[test]
fn oversized_stroke_is_rescaled_to_the_canvas() {
    let canvas = Canvas::transparent(size(200, 200));
    let mut rng = GlyphRng::seed_from_u64(42);
    let outcome = strategy(boundary_anchors()[3]).search(&canvas, &ink(300, 300), &mut rng);
    let SearchOutcome::Found(cand) = outcome else {
        panic!("expected a position");
    };
    let fitted = cand.stroke.unwrap();
    assert_eq!((fitted.width(), fitted.height()), (200, 200));
    assert_eq!(cand.position, Point::new(0, 0));
}

#[test]
fn jitter_only_moves_unconstrained_axis() {
    let mut canvas = Canvas::transparent(size(200, 200));
    // Occupy the canonical (centred) band so the first attempt is rejected.
    canvas.composite(&ink(200, 20), Point::new(0, 90));
    let mut rng = GlyphRng::seed_from_u64(7);
    let s = strategy(Anchor::left());
    match s.search(&canvas, &ink(50, 20), &mut rng) {
        SearchOutcome::Found(cand) => {
            assert_eq!(cand.position.x, 0);
            assert_ne!(cand.position.y, 90);
            assert!((cand.position.y - 90).abs() <= 20);
        }
        SearchOutcome::Exhausted { fallback } => {
            assert_eq!(fallback.unwrap().position, Point::new(0, 90));
        }
        SearchOutcome::TooLarge => panic!("boundary fit never reports too large"),
    }
}

#[test]
fn exhaustion_falls_back_to_canonical_position() {
    let mut canvas = Canvas::transparent(size(100, 100));
    canvas.composite(&ink(100, 100), Point::ORIGIN);
    let mut rng = GlyphRng::seed_from_u64(1);
    match strategy(Anchor::right()).search(&canvas, &ink(30, 10), &mut rng) {
        SearchOutcome::Exhausted { fallback: Some(cand) } => {
            assert_eq!(cand.position, Point::new(0, 45));
            assert_eq!(cand.stroke.unwrap().width(), 100);
        }
        other => panic!("unexpected outcome {other:?}"),
    }
}
