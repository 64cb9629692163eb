//! Readiness endpoint

use axum::{Router, extract::State, response::IntoResponse, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use database::postgres::check_health;

use crate::state::AppState;

/// `GET /ready`: 200 once PostgreSQL answers `SELECT 1`, 503 otherwise.
async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let database: HealthCheckFuture<'_> =
        Box::pin(async { check_health(&state.db).await.map_err(|e| e.to_string()) });

    run_health_checks(vec![("database", database)]).await
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(ready))
        .with_state(state)
}
