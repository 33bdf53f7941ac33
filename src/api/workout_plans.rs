use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::Json,
    routing::{get, put},
    Extension, Router,
};
use axum_extra::extract::WithRejection;
use uuid::Uuid;

use super::error::ApiError;
use crate::auth::{jwt_auth_middleware, AuthService, UserSession};
use crate::models::{
    CreateWorkoutPlanRequest, DayListing, ExerciseListing, PlanListing, PlanTree, WeekListing,
    WorkoutPlan,
};
use crate::services::{
    PersonService, PlanGenerationService, WorkoutPlanService, WorkoutProgressService,
};
use crate::storage::PgPlanStore;

#[derive(Clone)]
pub struct WorkoutAppState {
    pub persons: PersonService,
    pub plans: WorkoutPlanService,
    pub progress: WorkoutProgressService,
    pub generator: PlanGenerationService<PgPlanStore>,
}

/// Plans, weeks and days of the authenticated person.
pub fn workout_routes(state: WorkoutAppState, auth_service: AuthService) -> Router {
    Router::new()
        .route("/workout-plans", get(list_plans).post(create_plan))
        .route("/workout-plans/:plan_id/weeks", get(list_weeks))
        .route("/workout-plans/:plan_id/finish", put(finish_plan))
        .route("/weeks/:week_id/days", get(list_days))
        .route("/days/:day_id/exercises", get(list_exercises))
        .route_layer(middleware::from_fn_with_state(auth_service, jwt_auth_middleware))
        .with_state(state)
}

#[tracing::instrument(skip_all, fields(user_id = %session.user_id))]
async fn create_plan(
    State(state): State<WorkoutAppState>,
    Extension(session): Extension<UserSession>,
    WithRejection(Json(request), _): WithRejection<Json<CreateWorkoutPlanRequest>, ApiError>,
) -> Result<(StatusCode, Json<PlanTree>), ApiError> {
    let person = state.persons.find_by_user(session.user_id).await?;
    let preferred_days = request.preferred_days.unwrap_or_default();

    let plan = state.generator.generate(person.as_ref(), &preferred_days).await?;

    Ok((StatusCode::CREATED, Json(plan)))
}

async fn list_plans(
    State(state): State<WorkoutAppState>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<PlanListing>, ApiError> {
    let listing = state.plans.list_plans(session.user_id).await?;
    Ok(Json(listing))
}

/// Opening a plan's weeks starts the plan.
#[tracing::instrument(skip_all, fields(user_id = %session.user_id, %plan_id))]
async fn list_weeks(
    State(state): State<WorkoutAppState>,
    Extension(session): Extension<UserSession>,
    Path(plan_id): Path<Uuid>,
) -> Result<Json<WeekListing>, ApiError> {
    state.progress.start_plan(session.user_id, plan_id).await?;
    let listing = state.plans.list_weeks(session.user_id, plan_id).await?;
    Ok(Json(listing))
}

#[tracing::instrument(skip_all, fields(user_id = %session.user_id, %plan_id))]
async fn finish_plan(
    State(state): State<WorkoutAppState>,
    Extension(session): Extension<UserSession>,
    Path(plan_id): Path<Uuid>,
) -> Result<Json<WorkoutPlan>, ApiError> {
    let plan = state.progress.finish_plan(session.user_id, plan_id).await?;
    Ok(Json(plan))
}

async fn list_days(
    State(state): State<WorkoutAppState>,
    Extension(session): Extension<UserSession>,
    Path(week_id): Path<Uuid>,
) -> Result<Json<DayListing>, ApiError> {
    let listing = state.plans.list_days(session.user_id, week_id).await?;
    Ok(Json(listing))
}

async fn list_exercises(
    State(state): State<WorkoutAppState>,
    Extension(session): Extension<UserSession>,
    Path(day_id): Path<Uuid>,
) -> Result<Json<ExerciseListing>, ApiError> {
    let listing = state.plans.list_exercises(session.user_id, day_id).await?;
    Ok(Json(listing))
}
