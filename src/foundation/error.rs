/// Convenience result type used across glyphweave.
pub type GlyphResult<T> = Result<T, GlyphError>;

/// Top-level error taxonomy for fallible engine APIs.
///
/// Placement problems of a single stroke are never reported through this type; they are
/// recorded as [`crate::Anomaly`] values on the composition report instead.
#[derive(thiserror::Error, Debug)]
pub enum GlyphError {
    /// Invalid user-provided configuration or pixel data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while decoding stroke or reference images.
    #[error("decode error: {0}")]
    Decode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GlyphError {
    /// Build a [`GlyphError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GlyphError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
