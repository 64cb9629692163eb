//! Inventory API - REST server for product inventory

use axum_helpers::{cors_layer_from_env, create_production_app, create_router, health_router};
use core_config::load_dotenv;
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{connect_from_config_with_retry, run_migrations};
use migration::Migrator;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();
    load_dotenv();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(
        app = config.app.name,
        version = config.app.version,
        environment = ?config.environment,
        "Starting Inventory API"
    );

    let db = connect_from_config_with_retry(config.database.clone(), None).await?;

    if config.run_migrations {
        run_migrations::<Migrator>(&db, config.app.name).await?;
    } else {
        info!("RUN_MIGRATIONS=false, skipping migrations");
    }

    let state = AppState {
        config: config.clone(),
        db,
    };

    let cors = cors_layer_from_env(&state.config.environment)?;
    let app = create_router::<openapi::ApiDoc>(api::routes(&state), cors)
        .merge(health_router(state.config.app))
        .merge(api::health::router(state.clone()));

    let db = state.db.clone();
    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing PostgreSQL pool");
            if let Err(e) = db.close().await {
                tracing::warn!(error = %e, "Failed to close PostgreSQL pool cleanly");
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Inventory API shutdown complete");
    Ok(())
}
