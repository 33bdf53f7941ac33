use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::auth::password::PasswordError;
use crate::models::ValidationError;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Username already exists")]
    UsernameAlreadyExists,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Missing authorization header")]
    MissingAuthHeader,
    #[error("Invalid authorization header format")]
    InvalidAuthHeaderFormat,
    #[error("{0}")]
    Password(#[from] PasswordError),
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials
            | AuthError::InvalidToken
            | AuthError::TokenExpired
            | AuthError::MissingAuthHeader
            | AuthError::InvalidAuthHeaderFormat => StatusCode::UNAUTHORIZED,
            AuthError::UsernameAlreadyExists => StatusCode::CONFLICT,
            AuthError::Password(e) if e.is_policy_violation() => StatusCode::BAD_REQUEST,
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::Password(_) | AuthError::Database(_) | AuthError::Jwt(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::UsernameAlreadyExists => "username_taken",
            AuthError::InvalidToken => "invalid_token",
            AuthError::TokenExpired => "token_expired",
            AuthError::MissingAuthHeader => "missing_auth_header",
            AuthError::InvalidAuthHeaderFormat => "invalid_auth_header",
            AuthError::Password(e) if e.is_policy_violation() => "weak_password",
            AuthError::Validation(_) => "validation_error",
            AuthError::Password(_) => "password_processing_error",
            AuthError::Database(_) => "database_error",
            AuthError::Jwt(_) => "token_error",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Authentication failure");
        }

        // Internal details stay in the log.
        let message = if status.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "error": self.code(),
            "message": message,
        }));

        (status, body).into_response()
    }
}
