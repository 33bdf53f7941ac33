use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::ServiceError;
use crate::models::{validate_biometrics, validate_gender, Person};

pub(crate) const PERSON_COLUMNS: &str = "id, user_id, gender, height, weight, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct PersonService {
    db: PgPool,
}

impl PersonService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Person>, ServiceError> {
        let person = sqlx::query_as::<_, Person>(&format!(
            "SELECT {PERSON_COLUMNS} FROM persons WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(person)
    }

    pub async fn get_by_user(&self, user_id: Uuid) -> Result<Person, ServiceError> {
        self.find_by_user(user_id)
            .await?
            .ok_or(ServiceError::NotFound("Person"))
    }

    /// Stored verbatim; only plan generation interprets the value.
    pub async fn update_gender(&self, user_id: Uuid, gender: &str) -> Result<Person, ServiceError> {
        validate_gender(gender)?;

        let person = sqlx::query_as::<_, Person>(&format!(
            "UPDATE persons SET gender = $1, updated_at = NOW()
             WHERE user_id = $2
             RETURNING {PERSON_COLUMNS}"
        ))
        .bind(gender)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(ServiceError::NotFound("Person"))?;

        info!(person_id = %person.id, "Updated gender");
        Ok(person)
    }

    pub async fn update_biometrics(
        &self,
        user_id: Uuid,
        height: f64,
        weight: f64,
    ) -> Result<Person, ServiceError> {
        validate_biometrics(height, weight)?;

        let person = sqlx::query_as::<_, Person>(&format!(
            "UPDATE persons SET height = $1, weight = $2, updated_at = NOW()
             WHERE user_id = $3
             RETURNING {PERSON_COLUMNS}"
        ))
        .bind(height)
        .bind(weight)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(ServiceError::NotFound("Person"))?;

        info!(person_id = %person.id, "Updated biometrics");
        Ok(person)
    }
}
