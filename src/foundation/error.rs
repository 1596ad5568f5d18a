use crate::dsl::error::DslError;

/// Convenience result type used across strokeforge.
pub type StrokeResult<T> = Result<T, StrokeError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum StrokeError {
    /// Structure was created after the builder was packed.
    #[error("authoring error: {0}")]
    Authoring(String),

    /// A curve could not be turned into a renderable path.
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Invalid options or misaligned keyframe data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Strict-mode DSL failure.
    #[error(transparent)]
    Dsl(#[from] DslError),

    /// Malformed JSON configuration.
    #[error("serialization error: {0}")]
    Serde(String),
}

impl StrokeError {
    /// Build a [`StrokeError::Authoring`] value.
    pub fn authoring(msg: impl Into<String>) -> Self {
        Self::Authoring(msg.into())
    }

    /// Build a [`StrokeError::Geometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    /// Build a [`StrokeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StrokeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
