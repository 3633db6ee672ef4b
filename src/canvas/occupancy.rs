use crate::canvas::composite::PremulRgba8;
use crate::stroke::model::VISIBLE_ALPHA_FLOOR;

/// Decides whether a canvas pixel already carries ink.
///
/// Transparent working canvases are best judged by alpha; canvases painted over an opaque
/// background need a colour test instead, since every pixel there is fully opaque.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OccupancyPredicate {
    /// Occupied when alpha is above `floor`. A floor of 0 counts any coverage.
    Alpha {
        /// Alpha values at or below this are ignored.
        floor: u8,
    },
    /// Occupied when the premultiplied colour sum `r + g + b` is above `min_sum`.
    NonBlack {
        /// Colour sums at or below this are treated as background.
        min_sum: u16,
    },
    /// Occupied when either the alpha or the colour test passes.
    AlphaOrNonBlack {
        /// Alpha values at or below this are ignored.
        floor: u8,
        /// Colour sums at or below this are treated as background.
        min_sum: u16,
    },
}

impl Default for OccupancyPredicate {
    fn default() -> Self {
        Self::Alpha {
            floor: VISIBLE_ALPHA_FLOOR,
        }
    }
}

impl OccupancyPredicate {
    /// Test one premultiplied canvas pixel.
    #[inline]
    pub fn is_occupied(self, px: PremulRgba8) -> bool {
        match self {
            Self::Alpha { floor } => px[3] > floor,
            Self::NonBlack { min_sum } => colour_sum(px) > min_sum,
            Self::AlphaOrNonBlack { floor, min_sum } => px[3] > floor || colour_sum(px) > min_sum,
        }
    }
}

fn colour_sum(px: PremulRgba8) -> u16 {
    u16::from(px[0]) + u16::from(px[1]) + u16::from(px[2])
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/occupancy.rs"]
mod tests;
