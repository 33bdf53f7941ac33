use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::Json,
    routing::post,
    Extension, Router,
};

use crate::auth::{
    jwt_auth_middleware, AuthError, AuthService, LoginRequest, LoginResponse, MessageResponse,
    RegisterRequest, UserSession,
};
use crate::models::UserResponse;

/// Authentication routes
pub fn auth_routes(auth_service: AuthService) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route(
            "/logout",
            post(logout).route_layer(middleware::from_fn_with_state(
                auth_service.clone(),
                jwt_auth_middleware,
            )),
        )
        .with_state(auth_service)
}

#[tracing::instrument(skip(auth_service, request))]
async fn register(
    State(auth_service): State<AuthService>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AuthError> {
    let user = auth_service.register(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[tracing::instrument(skip(auth_service, request))]
async fn login(
    State(auth_service): State<AuthService>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    let response = auth_service.login(request).await?;
    Ok(Json(response))
}

#[tracing::instrument(skip_all, fields(user_id = %session.user_id))]
async fn logout(
    State(auth_service): State<AuthService>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<MessageResponse>, AuthError> {
    let response = auth_service.logout(&session).await?;
    Ok(Json(response))
}
