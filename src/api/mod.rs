// HTTP routes and handlers

pub mod auth;
pub mod error;
pub mod exercises;
pub mod health;
pub mod person;
pub mod routes;
pub mod workout_plans;

pub use error::ApiError;
pub use routes::create_routes;
