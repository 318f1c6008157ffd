//! Custom error types for Spendwise
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for Spendwise operations
#[derive(Error, Debug)]
pub enum SpendwiseError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models and user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Malformed or insufficient training data
    #[error("Data error: {0}")]
    Data(String),

    /// Inference was requested before a trained model was available
    #[error("No trained model is loaded; run `spendwise model train` first")]
    ModelNotLoaded,

    /// A model artifact exists but cannot be used
    #[error("Model error: {0}")]
    Model(String),

    /// The transaction/budget/alert store could not be read or written
    #[error("Store unavailable: {0}")]
    Dependency(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl SpendwiseError {
    /// Create a "not found" error for budgets
    pub fn budget_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget",
            identifier: identifier.into(),
        }
    }

    /// Re-label a storage failure as an unavailable dependency.
    ///
    /// Errors that already describe the caller's input are passed through.
    pub fn into_dependency(self) -> Self {
        match self {
            Self::Dependency(_) | Self::Validation(_) | Self::NotFound { .. } => self,
            other => Self::Dependency(other.to_string()),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a training data error
    pub fn is_data(&self) -> bool {
        matches!(self, Self::Data(_))
    }

    /// Check if this is a dependency (store) error
    pub fn is_dependency(&self) -> bool {
        matches!(self, Self::Dependency(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for SpendwiseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SpendwiseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for SpendwiseError {
    fn from(err: csv::Error) -> Self {
        Self::Data(err.to_string())
    }
}

/// Result type alias for Spendwise operations
pub type SpendwiseResult<T> = Result<T, SpendwiseError>;
