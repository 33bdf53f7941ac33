use axum::{
    extract::State,
    middleware,
    response::Json,
    routing::{get, put},
    Extension, Router,
};
use axum_extra::extract::WithRejection;

use super::error::ApiError;
use crate::auth::{jwt_auth_middleware, AuthService, UserSession};
use crate::models::{Person, UpdateBiometricsRequest, UpdateGenderRequest};
use crate::services::PersonService;

pub fn person_routes(person_service: PersonService, auth_service: AuthService) -> Router {
    Router::new()
        .route("/", get(get_person))
        .route("/gender", put(update_gender))
        .route("/biometrics", put(update_biometrics))
        .route_layer(middleware::from_fn_with_state(auth_service, jwt_auth_middleware))
        .with_state(person_service)
}

async fn get_person(
    State(persons): State<PersonService>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<Person>, ApiError> {
    let person = persons.get_by_user(session.user_id).await?;
    Ok(Json(person))
}

#[tracing::instrument(skip_all, fields(user_id = %session.user_id))]
async fn update_gender(
    State(persons): State<PersonService>,
    Extension(session): Extension<UserSession>,
    WithRejection(Json(request), _): WithRejection<Json<UpdateGenderRequest>, ApiError>,
) -> Result<Json<Person>, ApiError> {
    let person = persons.update_gender(session.user_id, &request.gender).await?;
    Ok(Json(person))
}

#[tracing::instrument(skip_all, fields(user_id = %session.user_id))]
async fn update_biometrics(
    State(persons): State<PersonService>,
    Extension(session): Extension<UserSession>,
    WithRejection(Json(request), _): WithRejection<Json<UpdateBiometricsRequest>, ApiError>,
) -> Result<Json<Person>, ApiError> {
    let person = persons
        .update_biometrics(session.user_id, request.height, request.weight)
        .await?;
    Ok(Json(person))
}
