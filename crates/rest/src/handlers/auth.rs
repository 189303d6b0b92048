//! Signup and login handlers.
//!
//! Login only checks the credentials; no session or token is issued.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use matdb_persistence::core::{CredentialStorage, MaterialStorage};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RestResult;
use crate::state::AppState;

/// Body of `POST /auth/login`.
#[derive(Debug, Deserialize)]
#[allow(missing_docs)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /signup/signup`.
#[derive(Debug, Deserialize)]
#[allow(missing_docs)]
pub struct SignupRequest {
    pub firstname: String,
    pub email: String,
    pub password: String,
    pub repeat_password: String,
}

/// `{message}` acknowledgement.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable outcome.
    pub message: &'static str,
}

/// Handler for login.
///
/// # HTTP Request
///
/// `POST /auth/login`
///
/// # Response
///
/// - `200 OK` - credentials match
/// - `401 Unauthorized` - `invalid_credentials` for an unknown email,
///   `bad_password` for a wrong password
/// - `422 Unprocessable Entity` - malformed body
pub async fn login_handler<S>(
    State(state): State<AppState<S>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> RestResult<Json<MessageResponse>>
where
    S: MaterialStorage + CredentialStorage + Send + Sync,
{
    let Json(request) = body?;
    debug!(email = %request.email, "Processing login request");

    state
        .credentials()
        .verify_login(&request.email, &request.password)
        .await?;

    Ok(Json(MessageResponse {
        message: "Login successful",
    }))
}

/// Handler for signup.
///
/// # HTTP Request
///
/// `POST /signup/signup`
///
/// # Response
///
/// - `200 OK` - user registered
/// - `400 Bad Request` - `password_mismatch` or `email_taken`
/// - `422 Unprocessable Entity` - `invalid_email` or a malformed body
pub async fn signup_handler<S>(
    State(state): State<AppState<S>>,
    body: Result<Json<SignupRequest>, JsonRejection>,
) -> RestResult<Json<MessageResponse>>
where
    S: MaterialStorage + CredentialStorage + Send + Sync,
{
    let Json(request) = body?;
    debug!(email = %request.email, "Processing signup request");

    state
        .credentials()
        .create_user(
            &request.firstname,
            &request.email,
            &request.password,
            &request.repeat_password,
        )
        .await?;

    Ok(Json(MessageResponse {
        message: "User registered successfully",
    }))
}
