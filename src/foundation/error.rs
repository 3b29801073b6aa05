/// Crate-wide result alias.
pub type RayburstResult<T> = Result<T, RayburstError>;

/// Errors surfaced by settings handling, surfaces and export.
///
/// Rendering itself never fails; malformed parameters render as whatever the raster math
/// produces for them.
#[derive(thiserror::Error, Debug)]
pub enum RayburstError {
    /// A value is structurally valid but outside what the operation accepts.
    #[error("validation error: {0}")]
    Validation(String),

    /// Raw control input could not be parsed into a field value.
    #[error("parse error: {0}")]
    Parse(String),

    /// The durable settings store failed to load or save.
    #[error("store error: {0}")]
    Store(String),

    /// Settings could not be serialized or deserialized.
    #[error("serialization error: {0}")]
    Serde(String),

    /// A rendered frame could not be encoded as an image file.
    #[error("encode error: {0}")]
    Encode(String),

    /// Anything else, with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RayburstError {
    /// Build a [`RayburstError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RayburstError::Parse`].
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`RayburstError::Store`].
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Build a [`RayburstError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`RayburstError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
