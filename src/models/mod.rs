// Data models for accounts, persons and workout plans

pub mod person;
pub mod plan_draft;
pub mod user;
pub mod validation;
pub mod weekday;
pub mod workout_plan;

pub use person::*;
pub use plan_draft::*;
pub use user::*;
pub use validation::*;
pub use weekday::*;
pub use workout_plan::*;
