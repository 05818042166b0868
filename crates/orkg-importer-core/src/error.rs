//! Error types for orkg-importer-core

use thiserror::Error;

/// Result type alias for orkg-importer-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading mappings or importing records
#[derive(Error, Debug)]
pub enum Error {
    /// A mapping or batch file could not be found
    #[error("file not found: {path}")]
    NotFound {
        /// Path that was looked up
        path: String,
    },

    /// A document is missing a required key or has the wrong shape
    #[error("validation failed: {message}")]
    Validation {
        /// Description of what's invalid
        message: String,
    },

    /// The importer cannot be set up against the graph service
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the problem
        message: String,
    },

    /// The graph service rejected or failed a request
    #[error("graph service error during {operation}: {message}")]
    ExternalService {
        /// Operation that failed (e.g. `create_resource`)
        operation: String,
        /// Message reported by the service or transport
        message: String,
    },

    /// Failed to parse a YAML document
    #[error("failed to parse mapping: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a [`Error::Validation`]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for an [`Error::ExternalService`]
    pub fn external(operation: impl Into<String>, message: impl ToString) -> Self {
        Self::ExternalService {
            operation: operation.into(),
            message: message.to_string(),
        }
    }
}
