use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("account already exists: {0}")]
    DuplicateKey(String),

    /// Deliberately identical wording for unknown email and wrong password.
    #[error("email or password is incorrect")]
    InvalidCredentials,

    #[error("account is not active")]
    AccountInactive,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("illegal transition: {0}")]
    IllegalTransition(String),

    /// Store or hashing failures end up here; surfaced with the cause, never retried.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Label used for the `outcome` dimension of counters.
    pub fn outcome(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation",
            AppError::DuplicateKey(_) => "duplicate",
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::AccountInactive => "inactive",
            AppError::NotFound(_) => "not_found",
            AppError::IllegalTransition(_) => "illegal_transition",
            AppError::Internal(_) => "error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::AccountInactive => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateKey(_) | AppError::IllegalTransition(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}
