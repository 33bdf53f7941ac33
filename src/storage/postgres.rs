use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use tracing::debug;
use uuid::Uuid;

use super::{PlanStore, StoreError};
use crate::models::{
    Day, DayDraft, DayTree, Exercise, ExerciseDraft, ExerciseStep, ExerciseWithSteps, PlanDraft,
    PlanTree, Week, WeekDraft, WeekTree, WorkoutPlan,
};

pub(crate) const WORKOUT_PLAN_COLUMNS: &str =
    "id, person_id, name, number, started, finished, created_at";
pub(crate) const WEEK_COLUMNS: &str = "id, workout_plan_id, number, current_week, finished, created_at";
pub(crate) const DAY_COLUMNS: &str = "id, week_id, number, name, finished";
pub(crate) const EXERCISE_COLUMNS: &str =
    "id, day_id, position, name, description, finished, reps, sets, time_based, time, no_time_limit, link";
pub(crate) const EXERCISE_STEP_COLUMNS: &str = "id, exercise_id, position, instruction";

/// Commits each draft inside one transaction; dropping the transaction on an
/// error path rolls every insert back.
#[derive(Debug, Clone)]
pub struct PgPlanStore {
    db: PgPool,
}

impl PgPlanStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    async fn insert_plan(
        tx: &mut Transaction<'_, Postgres>,
        draft: &PlanDraft,
    ) -> Result<WorkoutPlan, StoreError> {
        let plan = sqlx::query_as::<_, WorkoutPlan>(&format!(
            "INSERT INTO workout_plans (id, person_id, name, number, started, finished, created_at)
             VALUES ($1, $2, $3, $4, false, false, $5)
             RETURNING {WORKOUT_PLAN_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(draft.person_id)
        .bind(&draft.name)
        .bind(draft.number)
        .bind(Utc::now())
        .fetch_one(&mut **tx)
        .await?;

        Ok(plan)
    }

    async fn insert_week(
        tx: &mut Transaction<'_, Postgres>,
        plan_id: Uuid,
        draft: &WeekDraft,
    ) -> Result<Week, StoreError> {
        let week = sqlx::query_as::<_, Week>(&format!(
            "INSERT INTO weeks (id, workout_plan_id, number, current_week, finished, created_at)
             VALUES ($1, $2, $3, $4, false, $5)
             RETURNING {WEEK_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(plan_id)
        .bind(draft.number)
        .bind(draft.current_week)
        .bind(Utc::now())
        .fetch_one(&mut **tx)
        .await?;

        Ok(week)
    }

    async fn insert_day(
        tx: &mut Transaction<'_, Postgres>,
        week_id: Uuid,
        draft: &DayDraft,
    ) -> Result<Day, StoreError> {
        let day = sqlx::query_as::<_, Day>(&format!(
            "INSERT INTO days (id, week_id, number, name, finished)
             VALUES ($1, $2, $3, $4, false)
             RETURNING {DAY_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(week_id)
        .bind(draft.number())
        .bind(draft.name())
        .fetch_one(&mut **tx)
        .await?;

        Ok(day)
    }

    async fn insert_exercise(
        tx: &mut Transaction<'_, Postgres>,
        day_id: Uuid,
        position: i32,
        draft: &ExerciseDraft,
    ) -> Result<Exercise, StoreError> {
        let columns = draft.mode.columns();

        let exercise = sqlx::query_as::<_, Exercise>(&format!(
            "INSERT INTO exercises (id, day_id, position, name, description, finished,
                                    reps, sets, time_based, time, no_time_limit, link)
             VALUES ($1, $2, $3, $4, $5, false, $6, $7, $8, $9, $10, $11)
             RETURNING {EXERCISE_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(day_id)
        .bind(position)
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(columns.reps)
        .bind(columns.sets)
        .bind(columns.time_based)
        .bind(columns.time)
        .bind(columns.no_time_limit)
        .bind(&draft.link)
        .fetch_one(&mut **tx)
        .await?;

        Ok(exercise)
    }

    /// Bulk insert of an exercise's steps in catalog order.
    async fn insert_steps(
        tx: &mut Transaction<'_, Postgres>,
        exercise_id: Uuid,
        steps: &[String],
    ) -> Result<Vec<ExerciseStep>, StoreError> {
        if steps.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("INSERT INTO exercise_steps (id, exercise_id, position, instruction) ");
        builder.push_values(steps.iter().enumerate(), |mut row, (position, instruction)| {
            row.push_bind(Uuid::new_v4())
                .push_bind(exercise_id)
                .push_bind(position as i32)
                .push_bind(instruction.clone());
        });
        builder.push(format!(" RETURNING {EXERCISE_STEP_COLUMNS}"));

        let mut inserted = builder
            .build_query_as::<ExerciseStep>()
            .fetch_all(&mut **tx)
            .await?;

        if inserted.len() != steps.len() {
            return Err(StoreError::CreateFailed("exercise step"));
        }
        inserted.sort_by_key(|step| step.position);

        Ok(inserted)
    }
}

impl PlanStore for PgPlanStore {
    async fn latest_plan_number(&self, person_id: Uuid) -> Result<Option<i32>, StoreError> {
        let number = sqlx::query_scalar::<_, i32>(
            "SELECT number FROM workout_plans
             WHERE person_id = $1
             ORDER BY created_at DESC, number DESC
             LIMIT 1",
        )
        .bind(person_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(number)
    }

    async fn persist_plan(&self, draft: &PlanDraft) -> Result<PlanTree, StoreError> {
        let mut tx = self.db.begin().await?;

        let plan = Self::insert_plan(&mut tx, draft).await?;

        let mut weeks = Vec::with_capacity(draft.weeks.len());
        for week_draft in &draft.weeks {
            let week = Self::insert_week(&mut tx, plan.id, week_draft).await?;

            let mut days = Vec::with_capacity(week_draft.days.len());
            for day_draft in &week_draft.days {
                let day = Self::insert_day(&mut tx, week.id, day_draft).await?;

                let mut exercises = Vec::with_capacity(day_draft.exercises.len());
                for (position, exercise_draft) in day_draft.exercises.iter().enumerate() {
                    let exercise =
                        Self::insert_exercise(&mut tx, day.id, position as i32, exercise_draft)
                            .await?;
                    let steps = Self::insert_steps(&mut tx, exercise.id, &exercise_draft.steps)
                        .await?
                        .into_iter()
                        .map(|step| step.instruction)
                        .collect();

                    exercises.push(ExerciseWithSteps { exercise, steps });
                }

                days.push(DayTree { day, exercises });
            }

            weeks.push(WeekTree { week, days });
        }

        tx.commit().await?;
        debug!(plan_id = %plan.id, weeks = weeks.len(), "Committed workout plan");

        Ok(PlanTree { plan, weeks })
    }
}
