use axum::{
    extract::{Path, State},
    middleware,
    response::Json,
    routing::{get, put},
    Extension, Router,
};
use axum_extra::extract::WithRejection;
use uuid::Uuid;

use super::error::ApiError;
use super::workout_plans::WorkoutAppState;
use crate::auth::{jwt_auth_middleware, AuthService, UserSession};
use crate::models::{Exercise, ExerciseStep, UpdateRepsRequest, UpdateSetsRequest};
use crate::services::ProgressUpdate;

pub fn exercise_routes(state: WorkoutAppState, auth_service: AuthService) -> Router {
    Router::new()
        .route("/exercises/:exercise_id/steps", get(list_steps))
        .route("/exercises/:exercise_id/finish", put(finish_exercise))
        .route("/exercises/:exercise_id/sets", put(update_sets))
        .route("/exercises/:exercise_id/reps", put(update_reps))
        .route_layer(middleware::from_fn_with_state(auth_service, jwt_auth_middleware))
        .with_state(state)
}

async fn list_steps(
    State(state): State<WorkoutAppState>,
    Extension(session): Extension<UserSession>,
    Path(exercise_id): Path<Uuid>,
) -> Result<Json<Vec<ExerciseStep>>, ApiError> {
    let steps = state.plans.list_steps(session.user_id, exercise_id).await?;
    Ok(Json(steps))
}

async fn finish_exercise(
    State(state): State<WorkoutAppState>,
    Extension(session): Extension<UserSession>,
    Path(exercise_id): Path<Uuid>,
) -> Result<Json<ProgressUpdate>, ApiError> {
    let update = state
        .progress
        .finish_exercise(session.user_id, exercise_id)
        .await?;
    Ok(Json(update))
}

#[tracing::instrument(skip_all, fields(user_id = %session.user_id, %exercise_id))]
async fn update_sets(
    State(state): State<WorkoutAppState>,
    Extension(session): Extension<UserSession>,
    Path(exercise_id): Path<Uuid>,
    WithRejection(Json(request), _): WithRejection<Json<UpdateSetsRequest>, ApiError>,
) -> Result<Json<Exercise>, ApiError> {
    let exercise = state
        .plans
        .update_sets(session.user_id, exercise_id, request.sets)
        .await?;
    Ok(Json(exercise))
}

#[tracing::instrument(skip_all, fields(user_id = %session.user_id, %exercise_id))]
async fn update_reps(
    State(state): State<WorkoutAppState>,
    Extension(session): Extension<UserSession>,
    Path(exercise_id): Path<Uuid>,
    WithRejection(Json(request), _): WithRejection<Json<UpdateRepsRequest>, ApiError>,
) -> Result<Json<Exercise>, ApiError> {
    let exercise = state
        .plans
        .update_reps(session.user_id, exercise_id, request.reps)
        .await?;
    Ok(Json(exercise))
}
