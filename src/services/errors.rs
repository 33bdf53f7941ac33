use thiserror::Error;

use crate::models::ValidationError;

/// Failures of the person, plan listing and progress services.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("Sets and reps cannot be changed on a timed exercise")]
    TimedExercise,
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
