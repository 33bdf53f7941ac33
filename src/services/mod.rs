// Plan generation and the services behind the HTTP routes

pub mod errors;
pub mod exercise_selector;
pub mod person_service;
pub mod plan_duration;
pub mod plan_generation_service;
pub mod training_load;
pub mod workout_plan_service;
pub mod workout_progress_service;

pub use errors::ServiceError;
pub use exercise_selector::ExerciseSelector;
pub use person_service::PersonService;
pub use plan_generation_service::{PlanError, PlanGenerationService, PlanParameters};
pub use training_load::{LoadError, TrainingLoad};
pub use workout_plan_service::WorkoutPlanService;
pub use workout_progress_service::{ProgressUpdate, WorkoutProgressService};
