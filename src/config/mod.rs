// Environment-driven configuration

pub mod app;
pub mod database;

pub use app::AppConfig;
pub use database::{run_migrations, DatabaseConfig, DEFAULT_DATABASE_URL, DEFAULT_TEST_DATABASE_URL};
