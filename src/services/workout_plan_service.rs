use std::collections::HashMap;

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::person_service::PersonService;
use super::ServiceError;
use crate::models::{
    validate_positive_count, Day, DayListing, Exercise, ExerciseListing, ExerciseStep,
    ExerciseWithSteps, PlanListing, Week, WeekListing, WorkoutPlan,
};
use crate::storage::postgres::{
    DAY_COLUMNS, EXERCISE_COLUMNS, EXERCISE_STEP_COLUMNS, WEEK_COLUMNS, WORKOUT_PLAN_COLUMNS,
};

// Ownership filters: each resolves the ids of one table reachable from a user.
const OWNED_PLANS: &str = "SELECT wp.id FROM workout_plans wp
     JOIN persons p ON p.id = wp.person_id
     WHERE p.user_id = $2";
const OWNED_WEEKS: &str = "SELECT w.id FROM weeks w
     JOIN workout_plans wp ON wp.id = w.workout_plan_id
     JOIN persons p ON p.id = wp.person_id
     WHERE p.user_id = $2";
const OWNED_DAYS: &str = "SELECT d.id FROM days d
     JOIN weeks w ON w.id = d.week_id
     JOIN workout_plans wp ON wp.id = w.workout_plan_id
     JOIN persons p ON p.id = wp.person_id
     WHERE p.user_id = $2";

/// Read access to a person's plans plus the sets/reps edits.
///
/// Every lookup is scoped to the calling user; records belonging to anyone
/// else are reported as not found.
#[derive(Debug, Clone)]
pub struct WorkoutPlanService {
    db: PgPool,
    persons: PersonService,
}

impl WorkoutPlanService {
    pub fn new(db: PgPool) -> Self {
        let persons = PersonService::new(db.clone());
        Self { db, persons }
    }

    pub async fn list_plans(&self, user_id: Uuid) -> Result<PlanListing, ServiceError> {
        let person = self.persons.get_by_user(user_id).await?;

        let plans = sqlx::query_as::<_, WorkoutPlan>(&format!(
            "SELECT {WORKOUT_PLAN_COLUMNS} FROM workout_plans
             WHERE person_id = $1
             ORDER BY number"
        ))
        .bind(person.id)
        .fetch_all(&self.db)
        .await?;

        let workouts_completed = plans.iter().all(|plan| plan.finished);

        Ok(PlanListing {
            data: plans,
            gender: person.gender,
            workouts_completed,
        })
    }

    pub async fn get_plan(&self, user_id: Uuid, plan_id: Uuid) -> Result<WorkoutPlan, ServiceError> {
        sqlx::query_as::<_, WorkoutPlan>(&format!(
            "SELECT {WORKOUT_PLAN_COLUMNS} FROM workout_plans
             WHERE id = $1 AND id IN ({OWNED_PLANS})"
        ))
        .bind(plan_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(ServiceError::NotFound("Workout plan"))
    }

    pub async fn list_weeks(&self, user_id: Uuid, plan_id: Uuid) -> Result<WeekListing, ServiceError> {
        let person = self.persons.get_by_user(user_id).await?;
        let plan = self.get_plan(user_id, plan_id).await?;

        let weeks = sqlx::query_as::<_, Week>(&format!(
            "SELECT {WEEK_COLUMNS} FROM weeks WHERE workout_plan_id = $1 ORDER BY number"
        ))
        .bind(plan.id)
        .fetch_all(&self.db)
        .await?;

        Ok(WeekListing {
            data: weeks,
            gender: person.gender,
            workout_name: plan.name,
        })
    }

    /// Days of a week ordered by calendar index.
    pub async fn list_days(&self, user_id: Uuid, week_id: Uuid) -> Result<DayListing, ServiceError> {
        let person = self.persons.get_by_user(user_id).await?;

        let owned = sqlx::query_scalar::<_, Uuid>(&format!(
            "SELECT id FROM weeks WHERE id = $1 AND id IN ({OWNED_WEEKS})"
        ))
        .bind(week_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;
        if owned.is_none() {
            return Err(ServiceError::NotFound("Week"));
        }

        let days = sqlx::query_as::<_, Day>(&format!(
            "SELECT {DAY_COLUMNS} FROM days WHERE week_id = $1 ORDER BY number"
        ))
        .bind(week_id)
        .fetch_all(&self.db)
        .await?;

        Ok(DayListing {
            data: days,
            gender: person.gender,
        })
    }

    pub async fn list_exercises(
        &self,
        user_id: Uuid,
        day_id: Uuid,
    ) -> Result<ExerciseListing, ServiceError> {
        let person = self.persons.get_by_user(user_id).await?;

        let day = sqlx::query_as::<_, Day>(&format!(
            "SELECT {DAY_COLUMNS} FROM days WHERE id = $1 AND id IN ({OWNED_DAYS})"
        ))
        .bind(day_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(ServiceError::NotFound("Day"))?;

        let exercises = sqlx::query_as::<_, Exercise>(&format!(
            "SELECT {EXERCISE_COLUMNS} FROM exercises WHERE day_id = $1 ORDER BY position"
        ))
        .bind(day.id)
        .fetch_all(&self.db)
        .await?;

        let ids: Vec<Uuid> = exercises.iter().map(|e| e.id).collect();
        let steps = sqlx::query_as::<_, ExerciseStep>(&format!(
            "SELECT {EXERCISE_STEP_COLUMNS} FROM exercise_steps
             WHERE exercise_id = ANY($1)
             ORDER BY exercise_id, position"
        ))
        .bind(&ids)
        .fetch_all(&self.db)
        .await?;

        Ok(ExerciseListing {
            data: attach_steps(exercises, steps),
            gender: person.gender,
            day_name: day.name,
        })
    }

    pub async fn get_exercise(&self, user_id: Uuid, exercise_id: Uuid) -> Result<Exercise, ServiceError> {
        sqlx::query_as::<_, Exercise>(&format!(
            "SELECT {EXERCISE_COLUMNS} FROM exercises
             WHERE id = $1 AND day_id IN ({OWNED_DAYS})"
        ))
        .bind(exercise_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(ServiceError::NotFound("Exercise"))
    }

    pub async fn list_steps(
        &self,
        user_id: Uuid,
        exercise_id: Uuid,
    ) -> Result<Vec<ExerciseStep>, ServiceError> {
        let exercise = self.get_exercise(user_id, exercise_id).await?;

        let steps = sqlx::query_as::<_, ExerciseStep>(&format!(
            "SELECT {EXERCISE_STEP_COLUMNS} FROM exercise_steps
             WHERE exercise_id = $1
             ORDER BY position"
        ))
        .bind(exercise.id)
        .fetch_all(&self.db)
        .await?;

        Ok(steps)
    }

    pub async fn update_sets(
        &self,
        user_id: Uuid,
        exercise_id: Uuid,
        sets: i32,
    ) -> Result<Exercise, ServiceError> {
        validate_positive_count(sets, "Sets")?;
        self.update_count(user_id, exercise_id, "sets", sets).await
    }

    pub async fn update_reps(
        &self,
        user_id: Uuid,
        exercise_id: Uuid,
        reps: i32,
    ) -> Result<Exercise, ServiceError> {
        validate_positive_count(reps, "Reps")?;
        self.update_count(user_id, exercise_id, "reps", reps).await
    }

    /// `column` is one of the two fixed count columns, never caller input.
    async fn update_count(
        &self,
        user_id: Uuid,
        exercise_id: Uuid,
        column: &'static str,
        value: i32,
    ) -> Result<Exercise, ServiceError> {
        let exercise = self.get_exercise(user_id, exercise_id).await?;
        if exercise.time_based {
            return Err(ServiceError::TimedExercise);
        }

        let updated = sqlx::query_as::<_, Exercise>(&format!(
            "UPDATE exercises SET {column} = $1
             WHERE id = $2 AND NOT time_based
             RETURNING {EXERCISE_COLUMNS}"
        ))
        .bind(value)
        .bind(exercise.id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(ServiceError::TimedExercise)?;

        info!(exercise_id = %updated.id, column, value, "Updated exercise load");
        Ok(updated)
    }
}

/// Pairs each exercise with its step instructions. Steps must arrive ordered
/// by position within each exercise.
pub fn attach_steps(exercises: Vec<Exercise>, steps: Vec<ExerciseStep>) -> Vec<ExerciseWithSteps> {
    let mut by_exercise: HashMap<Uuid, Vec<String>> = HashMap::new();
    for step in steps {
        by_exercise
            .entry(step.exercise_id)
            .or_default()
            .push(step.instruction);
    }

    exercises
        .into_iter()
        .map(|exercise| {
            let steps = by_exercise.remove(&exercise.id).unwrap_or_default();
            ExerciseWithSteps { exercise, steps }
        })
        .collect()
}
