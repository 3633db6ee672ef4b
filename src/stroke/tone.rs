use image::RgbaImage;

/// Brightness clamp applied to scanned strokes before composition.
///
/// Visible pixels brighter than `white_above` become pure white and pixels darker than
/// `black_below` become pure black; alpha is kept. Fully transparent pixels are untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToneClamp {
    /// Mean channel brightness above which a pixel is snapped to white.
    pub white_above: u8,
    /// Mean channel brightness below which a pixel is snapped to black.
    pub black_below: u8,
}

impl Default for ToneClamp {
    fn default() -> Self {
        Self {
            white_above: 180,
            black_below: 75,
        }
    }
}

impl ToneClamp {
    /// Apply the clamp to straight-alpha RGBA8 bytes.
    pub fn apply_rgba8(&self, rgba8: &mut [u8]) {
        let white = u16::from(self.white_above) * 3;
        let black = u16::from(self.black_below) * 3;
        for px in rgba8.chunks_exact_mut(4) {
            if px[3] == 0 {
                continue;
            }
            let sum = u16::from(px[0]) + u16::from(px[1]) + u16::from(px[2]);
            if sum > white {
                px[..3].fill(255);
            } else if sum < black {
                px[..3].fill(0);
            }
        }
    }

    /// Apply the clamp to a decoded image.
    pub fn apply(&self, img: &mut RgbaImage) {
        self.apply_rgba8(img);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stroke/tone.rs"]
mod tests;
