//! Error types for the ladder engine
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the application.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific ladder scenarios
#[derive(Debug, thiserror::Error)]
pub enum LadderError {
    #[error("Validation failed: {message}")]
    Validation { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Storage failure: {message}")]
    Storage { message: String },
}

impl LadderError {
    /// Create a validation error from any displayable message
    pub fn validation(message: impl Into<String>) -> Self {
        LadderError::Validation {
            message: message.into(),
        }
    }

    /// Create a conflict error (unique constraint violations, duplicate years)
    pub fn conflict(message: impl Into<String>) -> Self {
        LadderError::Conflict {
            message: message.into(),
        }
    }

    /// Create a not-found error for unresolvable lookups
    pub fn not_found(message: impl Into<String>) -> Self {
        LadderError::NotFound {
            message: message.into(),
        }
    }

    /// Create a storage error for I/O and serialization failures
    pub fn storage(message: impl Into<String>) -> Self {
        LadderError::Storage {
            message: message.into(),
        }
    }
}

/// Classify an error chain back into its ladder error kind, if it has one.
///
/// Useful at CLI/service boundaries that need to map outcomes without
/// losing the anyhow context accumulated along the way.
pub fn ladder_error_kind(err: &anyhow::Error) -> Option<&LadderError> {
    err.downcast_ref::<LadderError>()
}
