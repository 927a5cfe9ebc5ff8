/// Crate-wide result alias.
pub type HeartwaveResult<T> = Result<T, HeartwaveError>;

/// Errors raised at the I/O and validation boundaries.
///
/// The wave-field simulation itself never fails: malformed overrides fall back to the global
/// configuration and out-of-range triggers are ignored. Errors only surface when loading scenes,
/// allocating raster surfaces, or encoding output.
#[derive(thiserror::Error, Debug)]
pub enum HeartwaveError {
    /// External input (scene, config, palette, sequence) was rejected.
    #[error("validation error: {0}")]
    Validation(String),

    /// A raster or vector surface could not be created or read back.
    #[error("render error: {0}")]
    Render(String),

    /// Writing PNG/SVG/MP4 output failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// JSON (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped error from a lower layer (I/O, image codecs).
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HeartwaveError {
    /// Build a [`HeartwaveError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`HeartwaveError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`HeartwaveError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`HeartwaveError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
