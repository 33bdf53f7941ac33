use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use workout_challenge::api::create_routes;
use workout_challenge::catalog::{builtin_catalog, ExerciseCatalog};
use workout_challenge::config::{run_migrations, AppConfig, DatabaseConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let catalog = match &config.catalog_path {
        Some(path) => {
            let catalog = ExerciseCatalog::from_json_file(path)
                .with_context(|| format!("Failed to load exercise catalog from {}", path.display()))?;
            info!(path = %path.display(), exercises = catalog.len(), "Loaded exercise catalog");
            catalog
        }
        None => builtin_catalog().clone(),
    };

    let db_config = DatabaseConfig::from_env()?;
    let pool = db_config.create_pool().await?;
    run_migrations(&pool).await?;
    info!("Database migrations applied");

    let app = create_routes(pool, &config.jwt_secret, Arc::new(catalog));

    let address = config.server_address();
    let listener = TcpListener::bind(&address).await?;
    info!(environment = %config.environment, "Workout challenge server starting on http://{}", address);
    info!("Health check available at http://{}/health", address);

    axum::serve(listener, app).await?;

    Ok(())
}
