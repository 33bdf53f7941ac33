use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Biometric profile attached to exactly one user account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Person {
    pub id: Uuid,
    pub user_id: Uuid,
    pub gender: String,
    /// Height in meters.
    pub height: f64,
    /// Weight in kilograms.
    pub weight: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateGenderRequest {
    pub gender: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateBiometricsRequest {
    pub height: f64,
    pub weight: f64,
}
