//! Readiness endpoint

use axum::{Router, extract::State, response::IntoResponse, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use database::postgres::check_health;

use crate::state::AppState;

/// `200 {"status":"ready","database":"connected"}` or
/// `503 {"status":"not ready","database":"disconnected"}`
async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let database: HealthCheckFuture<'_> =
        Box::pin(async move { check_health(&state.db).await.map_err(|e| e.to_string()) });

    run_health_checks(vec![("database", database)]).await
}

pub fn router(state: AppState) -> Router {
    Router::new().route("/ready", get(ready)).with_state(state)
}
