use chrono::Weekday;
use uuid::Uuid;

use super::weekday::weekday_name;
use super::workout_plan::ExerciseMode;

/// A fully assembled plan that has not been written yet. Stores commit a
/// draft as a single unit.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanDraft {
    pub person_id: Uuid,
    pub number: i32,
    pub name: String,
    pub weeks: Vec<WeekDraft>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekDraft {
    pub number: i32,
    pub current_week: bool,
    pub days: Vec<DayDraft>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayDraft {
    pub weekday: Weekday,
    pub exercises: Vec<ExerciseDraft>,
}

impl DayDraft {
    /// Calendar index, Monday = 1.
    pub fn number(&self) -> i32 {
        self.weekday.number_from_monday() as i32
    }

    pub fn name(&self) -> &'static str {
        weekday_name(self.weekday)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseDraft {
    pub name: String,
    pub description: String,
    pub link: String,
    pub mode: ExerciseMode,
    pub steps: Vec<String>,
}

impl PlanDraft {
    pub fn days(&self) -> impl Iterator<Item = &DayDraft> {
        self.weeks.iter().flat_map(|w| w.days.iter())
    }

    pub fn exercises(&self) -> impl Iterator<Item = &ExerciseDraft> {
        self.days().flat_map(|d| d.exercises.iter())
    }

    pub fn step_count(&self) -> usize {
        self.exercises().map(|e| e.steps.len()).sum()
    }
}
