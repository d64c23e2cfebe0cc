/// Convenience result type used across the engine.
pub type SceneResult<T> = Result<T, SceneError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Unknown element ids are not errors: removal reports `false` and lookups return `None`.
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    /// The engine was asked to do something its current lifecycle state does not allow.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// Invalid user-provided scene or element data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors raised by a renderer while painting a frame.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing scene descriptions.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SceneError {
    /// Build a [`SceneError::InvalidOperation`] value.
    pub fn invalid_operation(msg: impl Into<String>) -> Self {
        Self::InvalidOperation(msg.into())
    }

    /// Build a [`SceneError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SceneError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SceneError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for SceneError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}
