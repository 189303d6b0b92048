//! Error types for the persistence layer.
//!
//! Errors are grouped by category: resource state, validation of inputs
//! handed to the store, and failures of the backend itself.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for all storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Resource state errors
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// Validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Backend-specific errors
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Errors related to resource state.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// A record with the same unique key already exists.
    #[error("{collection} record already exists: {key}")]
    AlreadyExists { collection: String, key: String },
}

/// Errors related to inputs handed to the store.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// The identifier is not a 24-character hexadecimal object id.
    #[error("invalid identifier '{value}': {message}")]
    InvalidIdentifier { value: String, message: String },

    /// A document cannot be stored or loaded in its current shape.
    #[error("invalid document: {message}")]
    InvalidDocument { message: String },
}

/// Errors originating from the database backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backend is currently unavailable.
    #[error("backend unavailable: {backend_name}: {message}")]
    Unavailable {
        backend_name: String,
        message: String,
    },

    /// Connection to the backend failed.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// A store operation did not complete within its time budget.
    #[error("{operation} on {backend_name} timed out after {timeout_ms}ms")]
    Timeout {
        backend_name: String,
        operation: String,
        timeout_ms: u64,
    },

    /// Query execution error.
    #[error("query execution failed: {message}")]
    QueryError { message: String },

    /// Serialization/deserialization error.
    #[error("serialization error: {message}")]
    SerializationError { message: String },

    /// Internal backend error.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl StorageError {
    /// Returns true when the error means the store could not be reached in time.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            StorageError::Backend(
                BackendError::Unavailable { .. }
                    | BackendError::ConnectionFailed { .. }
                    | BackendError::Timeout { .. }
            )
        )
    }
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_error_display() {
        let err = ResourceError::AlreadyExists {
            collection: "users".to_string(),
            key: "ada@example.org".to_string(),
        };
        assert_eq!(err.to_string(), "users record already exists: ada@example.org");
    }

    #[test]
    fn test_storage_error_from_variants() {
        let err: StorageError = ValidationError::InvalidIdentifier {
            value: "abc".to_string(),
            message: "expected 24 hex characters".to_string(),
        }
        .into();
        assert!(matches!(err, StorageError::Validation(_)));
        assert!(!err.is_unavailable());
    }

    #[test]
    fn test_timeout_is_unavailable() {
        let err: StorageError = BackendError::Timeout {
            backend_name: "mongodb".to_string(),
            operation: "find_one".to_string(),
            timeout_ms: 5000,
        }
        .into();
        assert!(err.is_unavailable());
        assert!(err.to_string().contains("5000ms"));
    }
}
