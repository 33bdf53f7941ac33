// Shared fixtures for integration tests

#![allow(dead_code)]

use std::sync::Mutex;

use chrono::Utc;
use fake::Fake;
use sqlx::PgPool;
use uuid::Uuid;

use workout_challenge::config::{run_migrations, DatabaseConfig};
use workout_challenge::models::{
    Day, DayTree, Exercise, ExerciseStep, ExerciseWithSteps, Person, PlanDraft, PlanTree, Week,
    WeekTree, WorkoutPlan,
};
use workout_challenge::storage::{PlanStore, StoreError};

/// Rows committed by a [`MemoryPlanStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryTables {
    pub plans: Vec<WorkoutPlan>,
    pub weeks: Vec<Week>,
    pub days: Vec<Day>,
    pub exercises: Vec<Exercise>,
    pub steps: Vec<ExerciseStep>,
}

impl MemoryTables {
    pub fn record_count(&self) -> usize {
        self.plans.len() + self.weeks.len() + self.days.len() + self.exercises.len() + self.steps.len()
    }
}

/// In-memory plan store. Inserts go to a staged copy of the tables that only
/// replaces the committed copy when the whole draft went in.
#[derive(Debug, Default)]
pub struct MemoryPlanStore {
    tables: Mutex<MemoryTables>,
    fail_on_insert: Mutex<Option<usize>>,
    insert_attempts: Mutex<usize>,
}

impl MemoryPlanStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the n-th record insert (1-based) of every following commit fail.
    pub fn fail_on_insert(&self, n: usize) {
        *self.fail_on_insert.lock().unwrap() = Some(n);
    }

    pub fn clear_failure(&self) {
        *self.fail_on_insert.lock().unwrap() = None;
    }

    pub fn tables(&self) -> MemoryTables {
        self.tables.lock().unwrap().clone()
    }

    /// Total record inserts tried, including ones that were rolled back.
    pub fn insert_attempts(&self) -> usize {
        *self.insert_attempts.lock().unwrap()
    }

    fn stage(&self, draft: &PlanDraft) -> Result<PlanTree, StoreError> {
        let fail_on = *self.fail_on_insert.lock().unwrap();
        let mut attempts = self.insert_attempts.lock().unwrap();
        let mut staged = self.tables.lock().unwrap().clone();
        let mut inserted = 0usize;

        let mut insert = |table: &'static str| -> Result<(), StoreError> {
            inserted += 1;
            *attempts += 1;
            if fail_on == Some(inserted) {
                return Err(StoreError::CreateFailed(table));
            }
            Ok(())
        };

        if staged
            .plans
            .iter()
            .any(|p| p.person_id == draft.person_id && p.number == draft.number)
        {
            return Err(StoreError::CreateFailed("workout plan"));
        }

        insert("workout plan")?;
        let plan = WorkoutPlan {
            id: Uuid::new_v4(),
            person_id: draft.person_id,
            name: draft.name.clone(),
            number: draft.number,
            started: false,
            finished: false,
            created_at: Utc::now(),
        };
        staged.plans.push(plan.clone());

        let mut weeks = Vec::new();
        for week_draft in &draft.weeks {
            insert("week")?;
            let week = Week {
                id: Uuid::new_v4(),
                workout_plan_id: plan.id,
                number: week_draft.number,
                current_week: week_draft.current_week,
                finished: false,
                created_at: Utc::now(),
            };
            staged.weeks.push(week.clone());

            let mut days = Vec::new();
            for day_draft in &week_draft.days {
                insert("day")?;
                let day = Day {
                    id: Uuid::new_v4(),
                    week_id: week.id,
                    number: day_draft.number(),
                    name: day_draft.name().to_string(),
                    finished: false,
                };
                staged.days.push(day.clone());

                let mut exercises = Vec::new();
                for (position, exercise_draft) in day_draft.exercises.iter().enumerate() {
                    insert("exercise")?;
                    let columns = exercise_draft.mode.columns();
                    let exercise = Exercise {
                        id: Uuid::new_v4(),
                        day_id: day.id,
                        position: position as i32,
                        name: exercise_draft.name.clone(),
                        description: exercise_draft.description.clone(),
                        finished: false,
                        reps: columns.reps,
                        sets: columns.sets,
                        time_based: columns.time_based,
                        time: columns.time,
                        no_time_limit: columns.no_time_limit,
                        link: exercise_draft.link.clone(),
                    };
                    staged.exercises.push(exercise.clone());

                    for (step_position, instruction) in exercise_draft.steps.iter().enumerate() {
                        insert("exercise step")?;
                        staged.steps.push(ExerciseStep {
                            id: Uuid::new_v4(),
                            exercise_id: exercise.id,
                            position: step_position as i32,
                            instruction: instruction.clone(),
                        });
                    }

                    exercises.push(ExerciseWithSteps {
                        exercise,
                        steps: exercise_draft.steps.clone(),
                    });
                }
                days.push(DayTree { day, exercises });
            }
            weeks.push(WeekTree { week, days });
        }

        *self.tables.lock().unwrap() = staged;
        Ok(PlanTree { plan, weeks })
    }
}

impl PlanStore for MemoryPlanStore {
    async fn latest_plan_number(&self, person_id: Uuid) -> Result<Option<i32>, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .plans
            .iter()
            .rev()
            .find(|plan| plan.person_id == person_id)
            .map(|plan| plan.number))
    }

    async fn persist_plan(&self, draft: &PlanDraft) -> Result<PlanTree, StoreError> {
        self.stage(draft)
    }
}

pub fn person(gender: &str, height: f64, weight: f64) -> Person {
    Person {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        gender: gender.to_string(),
        height,
        weight,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// A person whose biometrics always yield a training load.
pub fn random_person() -> Person {
    let genders = ["male", "female", "Male", "FEMALE"];
    let gender = genders[(0..genders.len()).fake::<usize>()];
    person(gender, (1.45..2.05).fake::<f64>(), (40.0..140.0).fake::<f64>())
}

pub fn days(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

/// Pool for Postgres-backed tests, or `None` when no test database is reachable.
pub async fn test_pool() -> Option<PgPool> {
    let config = DatabaseConfig::for_tests();

    match config.create_pool().await {
        Ok(pool) => {
            run_migrations(&pool)
                .await
                .expect("migrations should apply to the test database");
            Some(pool)
        }
        Err(e) => {
            println!("Test database not available ({e:#}), skipping integration test");
            None
        }
    }
}
