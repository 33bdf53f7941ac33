use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::{PlanError, ServiceError};

/// Error type of every non-auth handler.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Plan(#[from] PlanError),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Plan(e) => match e {
                PlanError::MissingPerson => StatusCode::NOT_FOUND,
                PlanError::MissingPreferredDays | PlanError::UnknownWeekday(_) => {
                    StatusCode::BAD_REQUEST
                }
                PlanError::IndeterminateLoad(_) | PlanError::IndeterminateDuration => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                PlanError::CreationFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Service(e) => match e {
                ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
                ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
                ServiceError::TimedExercise => StatusCode::UNPROCESSABLE_ENTITY,
                ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::InvalidBody(rejection) => rejection.status(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Plan(e) => match e {
                PlanError::MissingPerson => "person_not_found",
                PlanError::MissingPreferredDays => "missing_preferred_days",
                PlanError::UnknownWeekday(_) => "unknown_weekday",
                PlanError::IndeterminateLoad(_) => "indeterminate_load",
                PlanError::IndeterminateDuration => "indeterminate_duration",
                PlanError::CreationFailure(_) => "plan_creation_failed",
            },
            ApiError::Service(e) => match e {
                ServiceError::NotFound(_) => "not_found",
                ServiceError::Validation(_) => "validation_error",
                ServiceError::TimedExercise => "timed_exercise",
                ServiceError::Database(_) => "database_error",
            },
            ApiError::InvalidBody(_) => "invalid_body",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
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
