use rand::SeedableRng;

use super::*;
use crate::foundation::core::GlyphRng;

fn ink(w: u32, h: u32) -> Stroke {
    Stroke::filled(w, h, [255, 255, 255, 255])
}

fn canvas() -> CanvasSize {
    CanvasSize::new(200, 200).unwrap()
}

#[test]
fn importance_prefers_oriented_strokes() {
    // 60x20 has area 1200 * 1.5 = 1800 weight; 40x40 has 1600.
    let strokes = vec![ink(40, 40), ink(60, 20), ink(10, 10)];
    let mut rng = GlyphRng::seed_from_u64(0);
    let order = order_strokes(&strokes, canvas(), StrokeOrdering::Importance, &mut rng);
    assert_eq!(order, vec![1, 0, 2]);
}

#[test]
fn area_ordering_ignores_orientation() {
    let strokes = vec![ink(60, 20), ink(40, 40), ink(10, 10)];
    let mut rng = GlyphRng::seed_from_u64(0);
    let order = order_strokes(&strokes, canvas(), StrokeOrdering::Area, &mut rng);
    assert_eq!(order, vec![1, 0, 2]);
}

#[test]
fn ties_keep_input_order() {
    let strokes = vec![ink(10, 10), ink(10, 10), ink(10, 10)];
    let mut rng = GlyphRng::seed_from_u64(0);
    let order = order_strokes(&strokes, canvas(), StrokeOrdering::Importance, &mut rng);
    assert_eq!(order, vec![0, 1, 2]);
}

#[test]
fn balanced_ordering_interleaves_kinds() {
    let strokes = vec![
        ink(100, 10),
        ink(100, 12),
        ink(10, 100),
        ink(30, 30),
        ink(100, 14),
    ];
    let mut rng = GlyphRng::seed_from_u64(11);
    let order = order_strokes(&strokes, canvas(), StrokeOrdering::ShuffledBalanced, &mut rng);

    let mut sorted = order.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, vec![0, 1, 2, 3, 4]);

    let kinds: Vec<StrokeKind> = order.iter().map(|&i| strokes[i].kind()).collect();
    assert_eq!(
        &kinds[..3],
        &[StrokeKind::Horizontal, StrokeKind::Vertical, StrokeKind::Other]
    );
    assert_eq!(&kinds[3..], &[StrokeKind::Horizontal, StrokeKind::Horizontal]);
}

#[test]
fn balanced_ordering_is_seeded() {
    let strokes: Vec<Stroke> = (1..8).map(|i| ink(10 * i, 20)).collect();
    let a = order_strokes(
        &strokes,
        canvas(),
        StrokeOrdering::ShuffledBalanced,
        &mut GlyphRng::seed_from_u64(3),
    );
    let b = order_strokes(
        &strokes,
        canvas(),
        StrokeOrdering::ShuffledBalanced,
        &mut GlyphRng::seed_from_u64(3),
    );
    assert_eq!(a, b);
}
