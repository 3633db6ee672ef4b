use rand::Rng;
use rand::seq::SliceRandom;

use crate::foundation::core::CanvasSize;
use crate::stroke::model::{Stroke, StrokeKind};

/// Order in which strokes are offered to the placement strategies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokeOrdering {
    /// Descending importance; ties keep input order.
    #[default]
    Importance,
    /// Descending bounding-box area; ties keep input order.
    Area,
    /// Random shuffle, then round-robin over horizontal, vertical and other strokes.
    ShuffledBalanced,
}

/// Return stroke indices in placement order.
pub(crate) fn order_strokes<R: Rng + ?Sized>(
    strokes: &[Stroke],
    canvas: CanvasSize,
    ordering: StrokeOrdering,
    rng: &mut R,
) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..strokes.len()).collect();
    match ordering {
        StrokeOrdering::Importance => {
            let scores: Vec<f64> = strokes.iter().map(|s| s.importance(canvas)).collect();
            idx.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
        }
        StrokeOrdering::Area => {
            idx.sort_by(|&a, &b| strokes[b].area().cmp(&strokes[a].area()));
        }
        StrokeOrdering::ShuffledBalanced => {
            idx.shuffle(rng);
            idx = balance_kinds(strokes, &idx);
        }
    }
    idx
}

fn balance_kinds(strokes: &[Stroke], shuffled: &[usize]) -> Vec<usize> {
    let bucket = |kind: StrokeKind| -> Vec<usize> {
        shuffled
            .iter()
            .copied()
            .filter(|&i| strokes[i].kind() == kind)
            .collect()
    };
    let buckets = [
        bucket(StrokeKind::Horizontal),
        bucket(StrokeKind::Vertical),
        bucket(StrokeKind::Other),
    ];

    let longest = buckets.iter().map(Vec::len).max().unwrap_or(0);
    let mut out = Vec::with_capacity(shuffled.len());
    for round in 0..longest {
        for b in &buckets {
            if let Some(&i) = b.get(round) {
                out.push(i);
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/compose/ordering.rs"]
mod tests;
