use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WorkoutPlan {
    pub id: Uuid,
    pub person_id: Uuid,
    pub name: String,
    pub number: i32,
    pub started: bool,
    pub finished: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Week {
    pub id: Uuid,
    pub workout_plan_id: Uuid,
    pub number: i32,
    pub current_week: bool,
    pub finished: bool,
    pub created_at: DateTime<Utc>,
}

/// One training session, tagged with its calendar weekday (Monday = 1).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Day {
    pub id: Uuid,
    pub week_id: Uuid,
    pub number: i32,
    pub name: String,
    pub finished: bool,
}

/// Stored exercise row. The reps/sets and timing columns encode an
/// [`ExerciseMode`]; use [`Exercise::mode`] rather than reading them directly.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Exercise {
    pub id: Uuid,
    pub day_id: Uuid,
    pub position: i32,
    pub name: String,
    pub description: String,
    pub finished: bool,
    pub reps: Option<i32>,
    pub sets: Option<i32>,
    pub time_based: bool,
    pub time: Option<String>,
    pub no_time_limit: bool,
    pub link: String,
}

impl Exercise {
    /// Decode the stored columns. Returns `None` for rows whose columns do not
    /// describe exactly one mode.
    pub fn mode(&self) -> Option<ExerciseMode> {
        match (self.time_based, self.no_time_limit) {
            (false, false) => {
                let sets = u32::try_from(self.sets?).ok().filter(|s| *s > 0)?;
                let reps = u32::try_from(self.reps?).ok().filter(|r| *r > 0)?;
                if self.time.is_some() {
                    return None;
                }
                Some(ExerciseMode::Untimed { sets, reps })
            }
            (true, false) => {
                if self.sets.is_some() || self.reps.is_some() {
                    return None;
                }
                self.time
                    .clone()
                    .map(|duration| ExerciseMode::TimedBounded { duration })
            }
            (true, true) => {
                if self.sets.is_some() || self.reps.is_some() || self.time.is_some() {
                    return None;
                }
                Some(ExerciseMode::TimedUnbounded)
            }
            (false, true) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ExerciseStep {
    pub id: Uuid,
    pub exercise_id: Uuid,
    pub position: i32,
    pub instruction: String,
}

/// How a single exercise instance is performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExerciseMode {
    Untimed { sets: u32, reps: u32 },
    TimedBounded { duration: String },
    TimedUnbounded,
}

/// Column values for an [`ExerciseMode`], as stored in `exercises`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseModeColumns {
    pub reps: Option<i32>,
    pub sets: Option<i32>,
    pub time_based: bool,
    pub time: Option<String>,
    pub no_time_limit: bool,
}

impl ExerciseMode {
    pub fn columns(&self) -> ExerciseModeColumns {
        match self {
            ExerciseMode::Untimed { sets, reps } => ExerciseModeColumns {
                reps: Some(*reps as i32),
                sets: Some(*sets as i32),
                time_based: false,
                time: None,
                no_time_limit: false,
            },
            ExerciseMode::TimedBounded { duration } => ExerciseModeColumns {
                reps: None,
                sets: None,
                time_based: true,
                time: Some(duration.clone()),
                no_time_limit: false,
            },
            ExerciseMode::TimedUnbounded => ExerciseModeColumns {
                reps: None,
                sets: None,
                time_based: true,
                time: None,
                no_time_limit: true,
            },
        }
    }

    pub fn is_timed(&self) -> bool {
        !matches!(self, ExerciseMode::Untimed { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseWithSteps {
    #[serde(flatten)]
    pub exercise: Exercise,
    pub steps: Vec<String>,
}

/// A persisted plan with all of its children, in display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanTree {
    pub plan: WorkoutPlan,
    pub weeks: Vec<WeekTree>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekTree {
    pub week: Week,
    pub days: Vec<DayTree>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayTree {
    pub day: Day,
    pub exercises: Vec<ExerciseWithSteps>,
}

impl PlanTree {
    pub fn days(&self) -> impl Iterator<Item = &DayTree> {
        self.weeks.iter().flat_map(|w| w.days.iter())
    }

    pub fn exercises(&self) -> impl Iterator<Item = &ExerciseWithSteps> {
        self.days().flat_map(|d| d.exercises.iter())
    }
}

/// Plans of the caller, with the profile gender shown next to them.
#[derive(Debug, Serialize)]
pub struct PlanListing {
    pub data: Vec<WorkoutPlan>,
    pub gender: String,
    /// True when no plan is left unfinished.
    pub workouts_completed: bool,
}

#[derive(Debug, Serialize)]
pub struct WeekListing {
    pub data: Vec<Week>,
    pub gender: String,
    pub workout_name: String,
}

#[derive(Debug, Serialize)]
pub struct DayListing {
    pub data: Vec<Day>,
    pub gender: String,
}

#[derive(Debug, Serialize)]
pub struct ExerciseListing {
    pub data: Vec<ExerciseWithSteps>,
    pub gender: String,
    pub day_name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateWorkoutPlanRequest {
    pub preferred_days: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSetsRequest {
    pub sets: i32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRepsRequest {
    pub reps: i32,
}
