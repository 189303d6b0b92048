//! Error types for the materials database API.
//!
//! Every error is rendered as a JSON body carrying a human-readable `detail`
//! and a stable machine-readable `code`:
//!
//! ```json
//! {"detail": "Material not found", "code": "not_found"}
//! ```
//!
//! # Error Mapping
//!
//! | Error | HTTP Status | Code |
//! |-------|-------------|------|
//! | InvalidIdentifier | 400 | invalid_identifier |
//! | BadRequest | 400 | bad_request |
//! | PasswordMismatch | 400 | password_mismatch |
//! | EmailTaken | 400 | email_taken |
//! | InvalidCredentials | 401 | invalid_credentials |
//! | BadPassword | 401 | bad_password |
//! | NotFound | 404 | not_found |
//! | Conflict | 409 | conflict |
//! | InvalidEmail | 422 | invalid_email |
//! | InvalidBody | 422 | invalid_body |
//! | ParseError | 500 | parse_error |
//! | ExportError | 500 | export_error |
//! | InternalError | 500 | internal_error |
//! | StoreUnavailable | 503 | store_unavailable |

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use matdb_persistence::error::{ResourceError, StorageError, ValidationError};
use std::fmt;

/// The primary error type for REST API operations.
#[derive(Debug)]
pub enum RestError {
    /// The identifier is not a 24-character hex object id (HTTP 400).
    InvalidIdentifier {
        /// The rejected identifier.
        value: String,
    },

    /// Malformed query parameter or request (HTTP 400).
    BadRequest {
        /// Error message.
        message: String,
    },

    /// Signup password and repeat differ (HTTP 400).
    PasswordMismatch,

    /// Signup email already registered (HTTP 400).
    EmailTaken,

    /// Login email is unknown (HTTP 401).
    InvalidCredentials,

    /// Login password does not match the stored hash (HTTP 401).
    BadPassword,

    /// Record or file not found (HTTP 404).
    NotFound {
        /// Error message.
        message: String,
    },

    /// A unique key already exists (HTTP 409).
    Conflict {
        /// Error message.
        message: String,
    },

    /// Signup email is not an address (HTTP 422).
    InvalidEmail {
        /// The rejected email.
        email: String,
    },

    /// Request body could not be decoded (HTTP 422).
    InvalidBody {
        /// Error message.
        message: String,
    },

    /// A stored document does not have the expected shape (HTTP 500).
    ParseError {
        /// Error message.
        message: String,
    },

    /// A stored structure could not be converted to CIF (HTTP 500).
    ExportError {
        /// Error message.
        message: String,
    },

    /// Internal server error (HTTP 500).
    InternalError {
        /// Error message.
        message: String,
    },

    /// The store could not be reached in time (HTTP 503).
    StoreUnavailable {
        /// Error message.
        message: String,
    },
}

impl RestError {
    /// Creates the 404 returned for unknown material identifiers.
    pub fn material_not_found() -> Self {
        RestError::NotFound {
            message: "Material not found".to_string(),
        }
    }

    /// Returns the HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            RestError::InvalidIdentifier { .. }
            | RestError::BadRequest { .. }
            | RestError::PasswordMismatch
            | RestError::EmailTaken => StatusCode::BAD_REQUEST,
            RestError::InvalidCredentials | RestError::BadPassword => StatusCode::UNAUTHORIZED,
            RestError::NotFound { .. } => StatusCode::NOT_FOUND,
            RestError::Conflict { .. } => StatusCode::CONFLICT,
            RestError::InvalidEmail { .. } | RestError::InvalidBody { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            RestError::ParseError { .. }
            | RestError::ExportError { .. }
            | RestError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            RestError::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Returns the stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            RestError::InvalidIdentifier { .. } => "invalid_identifier",
            RestError::BadRequest { .. } => "bad_request",
            RestError::PasswordMismatch => "password_mismatch",
            RestError::EmailTaken => "email_taken",
            RestError::InvalidCredentials => "invalid_credentials",
            RestError::BadPassword => "bad_password",
            RestError::NotFound { .. } => "not_found",
            RestError::Conflict { .. } => "conflict",
            RestError::InvalidEmail { .. } => "invalid_email",
            RestError::InvalidBody { .. } => "invalid_body",
            RestError::ParseError { .. } => "parse_error",
            RestError::ExportError { .. } => "export_error",
            RestError::InternalError { .. } => "internal_error",
            RestError::StoreUnavailable { .. } => "store_unavailable",
        }
    }

    /// Returns the human-readable detail sent to the client.
    pub fn detail(&self) -> String {
        match self {
            RestError::InvalidIdentifier { value } => format!(
                "Invalid material id '{}': expected 24 hexadecimal characters",
                value
            ),
            RestError::PasswordMismatch => "Passwords do not match".to_string(),
            RestError::EmailTaken => "Email already registered".to_string(),
            RestError::InvalidCredentials => "Invalid credentials".to_string(),
            RestError::BadPassword => "Incorrect password".to_string(),
            RestError::InvalidEmail { email } => format!("Invalid email address '{}'", email),
            RestError::ParseError { message } => format!("Data parsing error: {}", message),
            RestError::BadRequest { message }
            | RestError::NotFound { message }
            | RestError::Conflict { message }
            | RestError::InvalidBody { message }
            | RestError::ExportError { message }
            | RestError::InternalError { message }
            | RestError::StoreUnavailable { message } => message.clone(),
        }
    }
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestError::InvalidIdentifier { value } => write!(f, "Invalid identifier: {}", value),
            RestError::BadRequest { message } => write!(f, "Bad request: {}", message),
            RestError::PasswordMismatch => write!(f, "Password mismatch"),
            RestError::EmailTaken => write!(f, "Email taken"),
            RestError::InvalidCredentials => write!(f, "Invalid credentials"),
            RestError::BadPassword => write!(f, "Bad password"),
            RestError::NotFound { message } => write!(f, "Not found: {}", message),
            RestError::Conflict { message } => write!(f, "Conflict: {}", message),
            RestError::InvalidEmail { email } => write!(f, "Invalid email: {}", email),
            RestError::InvalidBody { message } => write!(f, "Invalid body: {}", message),
            RestError::ParseError { message } => write!(f, "Parse error: {}", message),
            RestError::ExportError { message } => write!(f, "Export error: {}", message),
            RestError::InternalError { message } => write!(f, "Internal error: {}", message),
            RestError::StoreUnavailable { message } => {
                write!(f, "Store unavailable: {}", message)
            }
        }
    }
}

impl std::error::Error for RestError {}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "detail": self.detail(),
            "code": self.code(),
        });
        (self.status(), Json(body)).into_response()
    }
}

// Implement conversions from storage errors

impl From<StorageError> for RestError {
    fn from(err: StorageError) -> Self {
        if err.is_unavailable() {
            return RestError::StoreUnavailable {
                message: err.to_string(),
            };
        }
        match err {
            StorageError::Resource(e) => e.into(),
            StorageError::Validation(e) => e.into(),
            StorageError::Backend(e) => RestError::InternalError {
                message: e.to_string(),
            },
        }
    }
}

impl From<ResourceError> for RestError {
    fn from(err: ResourceError) -> Self {
        match err {
            ResourceError::AlreadyExists { .. } => RestError::Conflict {
                message: err.to_string(),
            },
        }
    }
}

impl From<ValidationError> for RestError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::InvalidIdentifier { value, .. } => {
                RestError::InvalidIdentifier { value }
            }
            ValidationError::InvalidDocument { message } => RestError::ParseError { message },
        }
    }
}

impl From<JsonRejection> for RestError {
    fn from(err: JsonRejection) -> Self {
        RestError::InvalidBody {
            message: err.body_text(),
        }
    }
}

/// Result type alias for REST operations.
pub type RestResult<T> = Result<T, RestError>;

#[cfg(test)]
mod tests {
    use super::*;
    use matdb_persistence::error::BackendError;

    #[test]
    fn test_not_found_detail() {
        let err = RestError::material_not_found();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.code(), "not_found");
        assert_eq!(err.detail(), "Material not found");
    }

    #[test]
    fn test_signup_details_match_client_messages() {
        assert_eq!(RestError::PasswordMismatch.detail(), "Passwords do not match");
        assert_eq!(RestError::EmailTaken.detail(), "Email already registered");
        assert_eq!(RestError::InvalidCredentials.detail(), "Invalid credentials");
    }

    #[test]
    fn test_auth_errors_are_unauthorized() {
        assert_eq!(RestError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(RestError::BadPassword.status(), StatusCode::UNAUTHORIZED);
        assert_ne!(
            RestError::InvalidCredentials.code(),
            RestError::BadPassword.code()
        );
    }

    #[test]
    fn test_parse_error_display() {
        let err = RestError::ParseError {
            message: "Sites: expected an integer".to_string(),
        };
        assert!(err.to_string().contains("Parse error"));
        assert!(err.detail().starts_with("Data parsing error"));
    }

    #[test]
    fn test_timeout_maps_to_store_unavailable() {
        let err: RestError = StorageError::Backend(BackendError::Timeout {
            backend_name: "mongodb".to_string(),
            operation: "find_one".to_string(),
            timeout_ms: 5000,
        })
        .into();
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.code(), "store_unavailable");
    }

    #[test]
    fn test_query_error_maps_to_internal() {
        let err: RestError = StorageError::Backend(BackendError::QueryError {
            message: "bad projection".to_string(),
        })
        .into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_invalid_identifier_conversion() {
        let err: RestError = StorageError::Validation(ValidationError::InvalidIdentifier {
            value: "xyz".to_string(),
            message: "expected 24 hexadecimal characters".to_string(),
        })
        .into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "invalid_identifier");
    }

    #[test]
    fn test_already_exists_maps_to_conflict() {
        let err: RestError = StorageError::Resource(ResourceError::AlreadyExists {
            collection: "users".to_string(),
            key: "ada@example.org".to_string(),
        })
        .into();
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }
}
