/// Convenience result type used across slidecast.
pub type SlidecastResult<T> = Result<T, SlidecastError>;

/// Top-level error taxonomy used by pipeline APIs.
///
/// Only fatal conditions surface as errors. Degraded fits, missing slide images and measurement
/// failures are handled in place and logged.
#[derive(thiserror::Error, Debug)]
pub enum SlidecastError {
    /// A required input (script, entries, audio) is absent or inconsistent.
    #[error("missing input: {0}")]
    InputMissing(String),

    /// Invalid user-provided configuration or script data.
    #[error("validation error: {0}")]
    Validation(String),

    /// No usable font could be resolved or registered.
    #[error("font error: {0}")]
    Font(String),

    /// Errors while rasterizing a slide.
    #[error("render error: {0}")]
    Render(String),

    /// Errors from the external encoder or media probe.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SlidecastError {
    /// Build a [`SlidecastError::InputMissing`] value.
    pub fn input_missing(msg: impl Into<String>) -> Self {
        Self::InputMissing(msg.into())
    }

    /// Build a [`SlidecastError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SlidecastError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`SlidecastError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SlidecastError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`SlidecastError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` for the input-missing class of fatal errors.
    pub fn is_input_missing(&self) -> bool {
        matches!(self, Self::InputMissing(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
