//! # Axum Helpers
//!
//! Shared HTTP plumbing for the products service.
//!
//! ## Modules
//!
//! - **[`validation`]**: declarative per-field validation chains
//! - **[`extractors`]**: [`Validated`] extractor running those chains
//! - **[`errors`]**: [`AppError`] and its JSON error bodies
//! - **[`http`]**: CORS, origin enforcement, security headers
//! - **[`server`]**: router assembly, health checks, graceful shutdown
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//!
//! let router = create_router::<ApiDoc>(api_routes, &cors).merge(health_router(app_info!()));
//! create_production_app(router, &server_config, Duration::from_secs(30), async {}).await?;
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;
pub mod validation;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, close_postgres,
    create_production_app, create_router, health_router, run_health_checks,
};

pub use http::{create_cors_layer, enforce_origin, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse, ValidationErrorResponse};

pub use extractors::{Validated, ValidatedRequest};

pub use validation::{FieldChain, FieldError, Location, RequestInput, run_chains};
