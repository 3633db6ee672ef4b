use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::assets::decode::{load_stroke, probe_canvas_size};
use crate::foundation::core::CanvasSize;
use crate::foundation::error::{GlyphError, GlyphResult};
use crate::foundation::math::Fnv1a64;
use crate::stroke::model::Stroke;
use crate::stroke::tone::ToneClamp;

/// How a subject folder is turned into strokes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadOptions {
    /// Tone clamp applied to every stroke after decoding; `None` keeps the source tones.
    pub tone: Option<ToneClamp>,
    /// Canvas used when the folder has no reference image.
    pub fallback_canvas: CanvasSize,
    /// Canvas that wins over any reference image.
    pub canvas_override: Option<CanvasSize>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            tone: Some(ToneClamp::default()),
            fallback_canvas: CanvasSize::DEFAULT,
            canvas_override: None,
        }
    }
}

/// One folder of stroke fragments ready for composition.
#[derive(Clone, Debug)]
pub struct Subject {
    /// Folder name, used for output naming and seed derivation.
    pub name: String,
    pub dir: PathBuf,
    pub canvas: CanvasSize,
    /// Decoded strokes, in file name order.
    pub strokes: Vec<Stroke>,
    /// Source file of each entry in `strokes`.
    pub stroke_files: Vec<PathBuf>,
    /// Files that failed to decode and were left out.
    pub skipped_files: Vec<PathBuf>,
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

fn sorted_entries(dir: &Path) -> GlyphResult<Vec<PathBuf>> {
    let rd = std::fs::read_dir(dir).with_context(|| format!("read dir '{}'", dir.display()))?;
    let mut out = Vec::new();
    for entry in rd {
        let entry = entry.with_context(|| format!("read dir entry in '{}'", dir.display()))?;
        out.push(entry.path());
    }
    out.sort();
    Ok(out)
}

/// Load every `*.png` of `dir` as a stroke and size the canvas from the first `*.bmp`.
///
/// Files that fail to decode are skipped with a warning; a missing or unreadable folder is
/// an error.
pub fn load_subject(dir: impl AsRef<Path>, opts: &LoadOptions) -> GlyphResult<Subject> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(GlyphError::validation(format!(
            "subject '{}' is not a directory",
            dir.display()
        )));
    }
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let entries = sorted_entries(dir)?;

    let reference = entries
        .iter()
        .find(|p| p.is_file() && has_extension(p, "bmp"));
    let canvas = match (opts.canvas_override, reference) {
        (Some(size), _) => size,
        (None, Some(bmp)) => match probe_canvas_size(bmp) {
            Ok(size) => size,
            Err(err) => {
                tracing::warn!(file = %bmp.display(), %err, "unreadable reference image");
                opts.fallback_canvas
            }
        },
        (None, None) => opts.fallback_canvas,
    };

    let mut strokes = Vec::new();
    let mut stroke_files = Vec::new();
    let mut skipped_files = Vec::new();
    for path in entries
        .into_iter()
        .filter(|p| p.is_file() && has_extension(p, "png"))
    {
        match load_stroke(&path, opts.tone) {
            Ok(stroke) => {
                strokes.push(stroke);
                stroke_files.push(path);
            }
            Err(err) => {
                tracing::warn!(file = %path.display(), %err, "skipping undecodable stroke");
                skipped_files.push(path);
            }
        }
    }

    tracing::debug!(
        subject = %name,
        strokes = strokes.len(),
        skipped = skipped_files.len(),
        width = canvas.width,
        height = canvas.height,
        "subject loaded"
    );
    Ok(Subject {
        name,
        dir: dir.to_path_buf(),
        canvas,
        strokes,
        stroke_files,
        skipped_files,
    })
}

/// Sub-folders of `root`, sorted by path.
pub fn list_subjects(root: impl AsRef<Path>) -> GlyphResult<Vec<PathBuf>> {
    let root = root.as_ref();
    Ok(sorted_entries(root)?
        .into_iter()
        .filter(|p| p.is_dir())
        .collect())
}

/// Seed for one subject of a batch, independent of processing order.
pub fn subject_seed(base: u64, name: &str) -> u64 {
    let mut h = Fnv1a64::new_default();
    h.write_u64(base);
    h.write_bytes(name.as_bytes());
    h.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/assets/subject.rs"]
mod tests;
