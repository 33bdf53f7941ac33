use std::sync::Arc;

use chrono::Weekday;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::catalog::{ExerciseCatalog, Timing};
use crate::models::{
    DayDraft, ExerciseDraft, ExerciseMode, Person, PlanDraft, PlanTree, WeekDraft,
};
use crate::storage::{PlanStore, StoreError};

use super::exercise_selector::ExerciseSelector;
use super::plan_duration::determine_num_weeks;
use super::training_load::{training_load_for, LoadError, TrainingLoad};

pub const MIN_EXERCISES_PER_DAY: usize = 4;
pub const MAX_EXERCISES_PER_DAY: usize = 6;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("No person was given to plan for")]
    MissingPerson,
    #[error("At least one preferred day is required")]
    MissingPreferredDays,
    #[error("Unknown weekday: {0}")]
    UnknownWeekday(String),
    #[error("Sets and reps could not be determined: {0}")]
    IndeterminateLoad(#[from] LoadError),
    #[error("Number of weeks could not be determined")]
    IndeterminateDuration,
    #[error("Failed to create workout plan: {0}")]
    CreationFailure(#[from] StoreError),
}

/// Everything the assembler needs that is derived from the request.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanParameters {
    pub load: TrainingLoad,
    pub num_weeks: u32,
    pub days: Vec<Weekday>,
}

impl PlanParameters {
    /// Checks preconditions in order: person, preferred days, load, duration.
    pub fn derive<'p>(
        person: Option<&'p Person>,
        preferred_days: &[String],
    ) -> Result<(&'p Person, Self), PlanError> {
        let person = person.ok_or(PlanError::MissingPerson)?;
        let days = parse_preferred_days(preferred_days)?;
        let load = training_load_for(person)?;
        let num_weeks = determine_num_weeks(days.len()).ok_or(PlanError::IndeterminateDuration)?;

        Ok((
            person,
            Self {
                load,
                num_weeks,
                days,
            },
        ))
    }

    pub fn plan_name(&self) -> String {
        format!("{}/{} CHALLENGE", self.days.len(), self.num_weeks)
    }
}

/// Parses day names (full or three-letter, any case) in request order,
/// keeping the first occurrence of each weekday.
pub fn parse_preferred_days(names: &[String]) -> Result<Vec<Weekday>, PlanError> {
    if names.is_empty() {
        return Err(PlanError::MissingPreferredDays);
    }

    let mut days = Vec::with_capacity(names.len());
    for name in names {
        let weekday = name
            .trim()
            .parse::<Weekday>()
            .map_err(|_| PlanError::UnknownWeekday(name.clone()))?;
        if !days.contains(&weekday) {
            days.push(weekday);
        }
    }
    Ok(days)
}

/// Builds the complete plan in memory. Nothing here touches storage.
pub fn assemble_plan<R: Rng + ?Sized>(
    catalog: &ExerciseCatalog,
    person_id: Uuid,
    number: i32,
    parameters: &PlanParameters,
    rng: &mut R,
) -> PlanDraft {
    let mut selector = ExerciseSelector::new(catalog, rng);

    let weeks = (1..=parameters.num_weeks as i32)
        .map(|week_number| {
            let days = parameters
                .days
                .iter()
                .map(|&weekday| {
                    let count = rng.gen_range(MIN_EXERCISES_PER_DAY..=MAX_EXERCISES_PER_DAY);
                    let mut exercises = Vec::with_capacity(count);
                    for _ in 0..count {
                        let entry = selector.take(rng);
                        let mode = match &entry.timing {
                            Timing::Untimed => ExerciseMode::Untimed {
                                sets: parameters.load.sets,
                                reps: parameters.load.reps,
                            },
                            Timing::Bounded { duration } => ExerciseMode::TimedBounded {
                                duration: duration.clone(),
                            },
                            Timing::Unbounded => ExerciseMode::TimedUnbounded,
                        };
                        exercises.push(ExerciseDraft {
                            name: entry.name.clone(),
                            description: entry.description.clone(),
                            link: entry.link.clone(),
                            mode,
                            steps: entry.steps.clone(),
                        });
                    }
                    DayDraft { weekday, exercises }
                })
                .collect();

            WeekDraft {
                number: week_number,
                current_week: week_number == 1,
                days,
            }
        })
        .collect();

    PlanDraft {
        person_id,
        number,
        name: parameters.plan_name(),
        weeks,
    }
}

#[derive(Clone)]
pub struct PlanGenerationService<S> {
    store: S,
    catalog: Arc<ExerciseCatalog>,
}

impl<S: PlanStore> PlanGenerationService<S> {
    pub fn new(store: S, catalog: Arc<ExerciseCatalog>) -> Self {
        Self { store, catalog }
    }

    pub async fn generate(
        &self,
        person: Option<&Person>,
        preferred_days: &[String],
    ) -> Result<PlanTree, PlanError> {
        let mut rng = StdRng::from_entropy();
        self.generate_with_rng(person, preferred_days, &mut rng).await
    }

    /// Validates the request, stages the whole plan and commits it as one
    /// unit. On any error nothing from this attempt is stored.
    #[tracing::instrument(skip_all)]
    pub async fn generate_with_rng<R: Rng + Send>(
        &self,
        person: Option<&Person>,
        preferred_days: &[String],
        rng: &mut R,
    ) -> Result<PlanTree, PlanError> {
        let (person, parameters) = PlanParameters::derive(person, preferred_days)?;

        let number = self
            .store
            .latest_plan_number(person.id)
            .await?
            .map_or(1, |latest| latest + 1);

        let draft = assemble_plan(&self.catalog, person.id, number, &parameters, rng);
        info!(
            person_id = %person.id,
            number,
            weeks = parameters.num_weeks,
            days = draft.days().count(),
            exercises = draft.exercises().count(),
            "Generating workout plan"
        );

        let plan = self.store.persist_plan(&draft).await.map_err(|e| {
            warn!(person_id = %person.id, error = %e, "Workout plan creation rolled back");
            PlanError::CreationFailure(e)
        })?;

        Ok(plan)
    }
}
