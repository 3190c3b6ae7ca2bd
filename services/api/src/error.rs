//! Custom error types for the API service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Custom error type for the API service
///
/// Credential failures answer with a `message` field, everything else with
/// an `error` field, matching what the web client reads.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Registration with an email that is already taken
    #[error("Email is already in use")]
    DuplicateEmail,

    /// Login with an unknown email
    #[error("Email not found")]
    EmailNotFound,

    /// Login with a wrong password
    #[error("Invalid password")]
    InvalidPassword,

    /// Request payload failed validation
    #[error("{0}")]
    Validation(String),

    /// No bearer token was supplied
    #[error("Unauthorized")]
    Unauthorized,

    /// The bearer token is malformed, expired or wrongly signed
    #[error("Forbidden")]
    Forbidden,

    /// Resource is missing or not owned by the caller
    #[error("{0}")]
    NotFound(&'static str),

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::DuplicateEmail
            | ApiError::EmailNotFound
            | ApiError::InvalidPassword
            | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        let body = match self {
            ApiError::DuplicateEmail
            | ApiError::EmailNotFound
            | ApiError::InvalidPassword
            | ApiError::Validation(_) => Json(json!({ "message": message })),
            _ => Json(json!({ "error": message })),
        };

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
