/// Convenience result type used across taskline.
pub type TasklineResult<T> = Result<T, TasklineError>;

/// Top-level error taxonomy for boundary APIs.
///
/// Connector computation itself never fails; these errors only surface when loading or
/// validating timelines and options.
#[derive(thiserror::Error, Debug)]
pub enum TasklineError {
    /// Invalid user-provided timeline or option data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Inconsistent static layout hints.
    #[error("layout error: {0}")]
    Layout(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TasklineError {
    /// Build a [`TasklineError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TasklineError::Layout`] value.
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    /// Build a [`TasklineError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
