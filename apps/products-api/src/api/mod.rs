//! API routes module

pub mod health;
pub mod products;

use axum::Router;
use axum_helpers::{create_router, health_router};

use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Routes nested under `/api`
pub fn routes(state: &AppState) -> Router {
    Router::new().nest("/productos", products::router(state))
}

/// The complete application: docs, `/api`, fallback, layers, liveness and readiness
pub fn app(state: &AppState) -> Router {
    create_router::<ApiDoc>(routes(state), &state.config.cors)
        .merge(health_router(state.config.app))
        .merge(health::router(state.clone()))
}
