use std::sync::Arc;

use axum::{routing::get, Router};
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

use super::auth::auth_routes;
use super::exercises::exercise_routes;
use super::health::health_check;
use super::person::person_routes;
use super::workout_plans::{workout_routes, WorkoutAppState};
use crate::auth::{cors_layer, security_headers_layer, AuthService};
use crate::catalog::ExerciseCatalog;
use crate::services::{
    PersonService, PlanGenerationService, WorkoutPlanService, WorkoutProgressService,
};
use crate::storage::PgPlanStore;

pub fn create_routes(db: PgPool, jwt_secret: &str, catalog: Arc<ExerciseCatalog>) -> Router {
    let auth_service = AuthService::new(db.clone(), jwt_secret);
    let person_service = PersonService::new(db.clone());

    let workout_state = WorkoutAppState {
        persons: person_service.clone(),
        plans: WorkoutPlanService::new(db.clone()),
        progress: WorkoutProgressService::new(db.clone()),
        generator: PlanGenerationService::new(PgPlanStore::new(db), catalog),
    };

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/auth", auth_routes(auth_service.clone()))
        .nest("/api/person", person_routes(person_service, auth_service.clone()))
        .nest(
            "/api",
            workout_routes(workout_state.clone(), auth_service.clone())
                .merge(exercise_routes(workout_state, auth_service)),
        )
        .layer(security_headers_layer())
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}
