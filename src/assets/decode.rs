use std::path::Path;

use anyhow::Context;

use crate::canvas::surface::GlyphImage;
use crate::foundation::core::CanvasSize;
use crate::foundation::error::{GlyphError, GlyphResult};
use crate::stroke::model::Stroke;
use crate::stroke::tone::ToneClamp;

/// Decode encoded image bytes into a stroke, optionally clamping tones first.
pub fn decode_stroke(bytes: &[u8], tone: Option<ToneClamp>) -> GlyphResult<Stroke> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| GlyphError::decode(format!("decode stroke image: {e}")))?;
    let mut rgba = dyn_img.to_rgba8();
    if let Some(tone) = tone {
        tone.apply(&mut rgba);
    }
    Ok(Stroke::from_rgba_image(rgba))
}

/// Read and decode a stroke image from disk.
pub fn load_stroke(path: impl AsRef<Path>, tone: Option<ToneClamp>) -> GlyphResult<Stroke> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).with_context(|| format!("read stroke '{}'", path.display()))?;
    decode_stroke(&bytes, tone)
        .map_err(|e| GlyphError::decode(format!("'{}': {e}", path.display())))
}

/// Canvas extent taken from a reference image, without decoding its pixels.
pub fn probe_canvas_size(path: impl AsRef<Path>) -> GlyphResult<CanvasSize> {
    let path = path.as_ref();
    let (w, h) = image::image_dimensions(path)
        .map_err(|e| GlyphError::decode(format!("probe '{}': {e}", path.display())))?;
    CanvasSize::new(w, h)
}

/// Encode a finished glyph; the format follows the file extension.
pub fn save_glyph(img: &GlyphImage, path: impl AsRef<Path>) -> GlyphResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    img.to_rgb_image()?
        .save(path)
        .with_context(|| format!("write glyph '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
