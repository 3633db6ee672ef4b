use super::*;

#[test]
fn canvas_size_rejects_empty_extent() {
    assert!(CanvasSize::new(0, 10).is_err());
    assert!(CanvasSize::new(10, 0).is_err());
    let size = CanvasSize::new(200, 100).unwrap();
    assert_eq!(size.area(), 20_000);
    assert_eq!(size.rect(), IRect::new(0, 0, 200, 100));
}

#[test]
fn intersect_clips_to_overlap() {
    let a = IRect::new(0, 0, 10, 10);
    let b = IRect::from_origin_size(Point::new(-4, 6), 8, 8);
    assert_eq!(a.intersect(b), Some(IRect::new(0, 6, 4, 10)));
}

#[test]
fn touching_rects_do_not_intersect() {
    let a = IRect::new(0, 0, 10, 10);
    let b = IRect::new(10, 0, 20, 10);
    assert_eq!(a.intersect(b), None);
    assert!(IRect::new(5, 5, 5, 9).is_empty());
    assert_eq!(IRect::new(5, 5, 2, 9).width(), 0);
}

#[test]
fn inclusive_containment_accepts_far_edges() {
    let r = IRect::new(0, 0, 10, 10);
    assert!(r.contains_inclusive(Point::new(10, 10)));
    assert!(!r.contains_inclusive(Point::new(11, 0)));
    assert!(!r.contains_inclusive(Point::new(-1, 0)));
}
