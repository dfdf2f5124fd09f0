/// Convenience result type used across scenefit.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Recoverable constraint violations (too many elements, long labels,
/// collisions) are never reported through this type: they are data carried by
/// [`crate::ValidationResult`] and [`crate::SanitizationLog`]. A `LayoutError`
/// means no scene can be produced at all.
#[derive(thiserror::Error, Debug)]
pub enum LayoutError {
    /// Malformed scene input (missing ids, non-finite numbers, bad mode parameters).
    #[error("malformed scene: {0}")]
    Malformed(String),

    /// Invalid geometry registry or engine configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LayoutError {
    /// Build a [`LayoutError::Malformed`] value.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    /// Build a [`LayoutError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`LayoutError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for LayoutError {
    fn from(value: serde_json::Error) -> Self {
        Self::serde(value.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
