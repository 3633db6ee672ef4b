use super::*;

#[test]
fn best_effort_keeps_lowest_ratio() {
    let mut best = BestEffort::default();
    best.offer(Point::new(1, 1), OverlapOutcome::Overlapping { ratio: 0.6 });
    best.offer(Point::new(2, 2), OverlapOutcome::Overlapping { ratio: 0.2 });
    best.offer(Point::new(3, 3), OverlapOutcome::Overlapping { ratio: 0.2 });
    best.offer(Point::new(4, 4), OverlapOutcome::OutOfBounds);
    assert_eq!(best.into_candidate().unwrap().position, Point::new(2, 2));
}

#[test]
fn best_effort_ignores_out_of_bounds_only_runs() {
    let mut best = BestEffort::default();
    best.offer(Point::new(-500, 0), OverlapOutcome::OutOfBounds);
    assert!(best.into_candidate().is_none());
}
