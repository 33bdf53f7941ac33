use serde::Serialize;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::info;
use uuid::Uuid;

use super::ServiceError;
use crate::models::WorkoutPlan;
use crate::storage::postgres::WORKOUT_PLAN_COLUMNS;

/// Outcome of finishing one exercise, after completion has rippled upward.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProgressUpdate {
    pub exercise_id: Uuid,
    pub day_finished: bool,
    pub week_finished: bool,
    pub plan_finished: bool,
    /// Number of the week that became current, if completion moved it.
    pub current_week: Option<i32>,
}

/// Where an exercise sits inside its plan.
#[derive(Debug, Clone, sqlx::FromRow)]
struct ExercisePlacement {
    day_id: Uuid,
    week_id: Uuid,
    week_number: i32,
    current_week: bool,
    workout_plan_id: Uuid,
}

/// The week that becomes current once `finished_week` is done. Only the
/// current week hands over, and only to the week directly after it.
pub fn next_current_week(finished_week: i32, was_current: bool, week_count: i32) -> Option<i32> {
    let next = finished_week + 1;
    (was_current && next <= week_count).then_some(next)
}

#[derive(Debug, Clone)]
pub struct WorkoutProgressService {
    db: PgPool,
}

impl WorkoutProgressService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Marks a plan as started; called when its weeks are first listed.
    pub async fn start_plan(&self, user_id: Uuid, plan_id: Uuid) -> Result<WorkoutPlan, ServiceError> {
        self.set_plan_flag(user_id, plan_id, "started").await
    }

    pub async fn finish_plan(&self, user_id: Uuid, plan_id: Uuid) -> Result<WorkoutPlan, ServiceError> {
        let plan = self.set_plan_flag(user_id, plan_id, "finished").await?;
        info!(plan_id = %plan.id, "Workout plan finished");
        Ok(plan)
    }

    /// Finishes an exercise and, in the same transaction, its day, week and
    /// plan when those have nothing left to do.
    #[tracing::instrument(skip(self))]
    pub async fn finish_exercise(
        &self,
        user_id: Uuid,
        exercise_id: Uuid,
    ) -> Result<ProgressUpdate, ServiceError> {
        let mut tx = self.db.begin().await?;

        let placement = sqlx::query_as::<_, ExercisePlacement>(
            "SELECT d.id AS day_id, w.id AS week_id, w.number AS week_number,
                    w.current_week, w.workout_plan_id
             FROM exercises e
             JOIN days d ON d.id = e.day_id
             JOIN weeks w ON w.id = d.week_id
             JOIN workout_plans wp ON wp.id = w.workout_plan_id
             JOIN persons p ON p.id = wp.person_id
             WHERE e.id = $1 AND p.user_id = $2
             FOR UPDATE OF w",
        )
        .bind(exercise_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(ServiceError::NotFound("Exercise"))?;

        sqlx::query("UPDATE exercises SET finished = true WHERE id = $1")
            .bind(exercise_id)
            .execute(&mut *tx)
            .await?;

        let mut update = ProgressUpdate {
            exercise_id,
            ..ProgressUpdate::default()
        };

        update.day_finished = Self::close_if_complete(
            &mut tx,
            "UPDATE days SET finished = true
             WHERE id = $1 AND NOT EXISTS (
                 SELECT 1 FROM exercises WHERE day_id = $1 AND NOT finished
             )",
            placement.day_id,
        )
        .await?;
        if !update.day_finished {
            tx.commit().await?;
            return Ok(update);
        }

        update.week_finished = Self::close_if_complete(
            &mut tx,
            "UPDATE weeks SET finished = true
             WHERE id = $1 AND NOT EXISTS (
                 SELECT 1 FROM days WHERE week_id = $1 AND NOT finished
             )",
            placement.week_id,
        )
        .await?;
        if !update.week_finished {
            tx.commit().await?;
            return Ok(update);
        }

        let week_count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM weeks WHERE workout_plan_id = $1",
        )
        .bind(placement.workout_plan_id)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(next) =
            next_current_week(placement.week_number, placement.current_week, week_count as i32)
        {
            sqlx::query(
                "UPDATE weeks SET current_week = (number = $2)
                 WHERE workout_plan_id = $1 AND number IN ($2 - 1, $2)",
            )
            .bind(placement.workout_plan_id)
            .bind(next)
            .execute(&mut *tx)
            .await?;
            update.current_week = Some(next);
        }

        update.plan_finished = Self::close_if_complete(
            &mut tx,
            "UPDATE workout_plans SET finished = true
             WHERE id = $1 AND NOT EXISTS (
                 SELECT 1 FROM weeks WHERE workout_plan_id = $1 AND NOT finished
             )",
            placement.workout_plan_id,
        )
        .await?;

        tx.commit().await?;
        info!(
            plan_id = %placement.workout_plan_id,
            week = placement.week_number,
            plan_finished = update.plan_finished,
            "Week completed"
        );

        Ok(update)
    }

    /// Runs a guarded `UPDATE ... WHERE id = $1 AND NOT EXISTS (...)` and
    /// reports whether the row was closed.
    async fn close_if_complete(
        tx: &mut Transaction<'_, Postgres>,
        statement: &str,
        id: Uuid,
    ) -> Result<bool, ServiceError> {
        let result = sqlx::query(statement).bind(id).execute(&mut **tx).await?;
        Ok(result.rows_affected() > 0)
    }

    /// `flag` is one of the fixed boolean plan columns, never caller input.
    async fn set_plan_flag(
        &self,
        user_id: Uuid,
        plan_id: Uuid,
        flag: &'static str,
    ) -> Result<WorkoutPlan, ServiceError> {
        sqlx::query_as::<_, WorkoutPlan>(&format!(
            "UPDATE workout_plans SET {flag} = true
             WHERE id = $1
               AND person_id IN (SELECT id FROM persons WHERE user_id = $2)
             RETURNING {WORKOUT_PLAN_COLUMNS}"
        ))
        .bind(plan_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(ServiceError::NotFound("Workout plan"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_week_moves_forward_by_one() {
        assert_eq!(next_current_week(1, true, 6), Some(2));
        assert_eq!(next_current_week(5, true, 6), Some(6));
    }

    #[test]
    fn test_last_week_has_no_successor() {
        assert_eq!(next_current_week(6, true, 6), None);
        assert_eq!(next_current_week(4, true, 4), None);
    }

    #[test]
    fn test_only_the_current_week_hands_over() {
        // Finishing week 3 early while week 2 is current must not skip ahead.
        assert_eq!(next_current_week(3, false, 6), None);
    }
}
