//! Error types for the factory system

use thiserror::Error;

/// Errors raised while configuring a factory or producing instances
#[derive(Debug, Error)]
pub enum FactoryError {
    /// A sequence was constructed without any slots
    #[error("Invalid construction: {message}")]
    InvalidConstruction { message: String },

    /// The resolved attributes could not be turned into the target type
    #[error("Failed to materialize {target}: {source}")]
    Resolution {
        target: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A nested or deferred result could not be converted into a field value
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A deferred field computation reported a failure
    #[error("Deferred value for '{field}' failed: {message}")]
    Deferred { field: String, message: String },

    /// A batch result was read as a single instance
    #[error("Expected a single instance but the factory produced {count}")]
    UnexpectedBatch { count: usize },
}

impl FactoryError {
    pub fn invalid_construction(message: impl Into<String>) -> Self {
        FactoryError::InvalidConstruction {
            message: message.into(),
        }
    }

    pub fn deferred(field: impl Into<String>, message: impl Into<String>) -> Self {
        FactoryError::Deferred {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub type FactoryResult<T> = Result<T, FactoryError>;
