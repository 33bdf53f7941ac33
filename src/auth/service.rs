use chrono::Utc;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::{AuthError, JwtService, LoginRequest, LoginResponse, MessageResponse, RegisterRequest, UserSession};
use crate::models::{validate_email, validate_username, User, UserResponse};

const USER_COLUMNS: &str = "id, username, email, password_hash, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct AuthService {
    jwt_service: JwtService,
    db: PgPool,
}

impl AuthService {
    pub fn new(db: PgPool, jwt_secret: &str) -> Self {
        Self {
            jwt_service: JwtService::new(jwt_secret),
            db,
        }
    }

    /// Register a new user together with an empty person profile.
    #[tracing::instrument(skip_all, fields(username = %request.username))]
    pub async fn register(&self, request: RegisterRequest) -> Result<UserResponse, AuthError> {
        validate_username(&request.username)?;
        validate_email(&request.email)?;

        if self.get_user_by_username(&request.username).await?.is_some() {
            return Err(AuthError::UsernameAlreadyExists);
        }

        let password_hash = hash_password(&request.password)?;
        let now = Utc::now();

        let mut tx = self.db.begin().await?;

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (id, username, email, password_hash, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $5)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&request.username)
        .bind(&request.email)
        .bind(&password_hash)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_unique_violation)?;

        sqlx::query(
            "INSERT INTO persons (id, user_id, gender, height, weight, created_at, updated_at)
             VALUES ($1, $2, '', 0, 0, $3, $3)",
        )
        .bind(Uuid::new_v4())
        .bind(user.id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        info!(user_id = %user.id, "Registered user");

        Ok(user.into())
    }

    #[tracing::instrument(skip_all, fields(username = %request.username))]
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AuthError> {
        let user = self
            .get_user_by_username(&request.username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(&request.password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self.jwt_service.create_access_token(user.id, &user.username)?;
        let has_workout_plans = self.has_workout_plans(user.id).await?;

        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt_service.access_token_expires_in_seconds(),
            has_workout_plans,
            user: user.into(),
        })
    }

    /// Revoke the session's token until it would have expired anyway.
    pub async fn logout(&self, session: &UserSession) -> Result<MessageResponse, AuthError> {
        let expires_at = chrono::DateTime::from_timestamp(session.expires_at as i64, 0)
            .ok_or(AuthError::InvalidToken)?;

        sqlx::query(
            "INSERT INTO token_blacklist (jti, expires_at) VALUES ($1, $2)
             ON CONFLICT (jti) DO NOTHING",
        )
        .bind(&session.jti)
        .bind(expires_at)
        .execute(&self.db)
        .await?;

        info!(user_id = %session.user_id, "User logged out");

        Ok(MessageResponse {
            message: "Successfully logged out".to_string(),
        })
    }

    pub async fn is_token_blacklisted(&self, jti: &str) -> Result<bool, AuthError> {
        let result = sqlx::query("SELECT 1 FROM token_blacklist WHERE jti = $1 AND expires_at > NOW()")
            .bind(jti)
            .fetch_optional(&self.db)
            .await?;

        Ok(result.is_some())
    }

    pub async fn validate_session(&self, token: &str) -> Result<UserSession, AuthError> {
        let session = self.jwt_service.extract_user_session(token)?;

        if self.is_token_blacklisted(&session.jti).await? {
            return Err(AuthError::InvalidToken);
        }

        Ok(session)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    async fn has_workout_plans(&self, user_id: Uuid) -> Result<bool, AuthError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                 SELECT 1 FROM workout_plans wp
                 JOIN persons p ON p.id = wp.person_id
                 WHERE p.user_id = $1
             )",
        )
        .bind(user_id)
        .fetch_one(&self.db)
        .await?;

        Ok(exists)
    }
}

/// Two registrations racing past the existence check meet the unique index.
fn map_unique_violation(err: sqlx::Error) -> AuthError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AuthError::UsernameAlreadyExists
        }
        _ => AuthError::Database(err),
    }
}
