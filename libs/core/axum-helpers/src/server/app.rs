use crate::errors::handlers::not_found;
use crate::http::{create_cors_layer, enforce_origin, security_headers};
use super::shutdown::{coordinated_shutdown, ShutdownCoordinator};
use axum::{middleware, Router};
use core_config::cors::CorsConfig;
use core_config::server::ServerConfig;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{info, Level};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Path of the machine-readable OpenAPI document
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Path of the Swagger UI
pub const DOCS_PATH: &str = "/docs";

/// Assembles the public router around already-stateful API routes.
///
/// - Swagger UI at [`DOCS_PATH`], document at [`OPENAPI_JSON_PATH`]
/// - `apis` nested under `/api`
/// - `404 {"error": "Recurso no encontrado"}` for anything else
///
/// Layers, outermost first: compression, CORS, origin enforcement, security
/// headers, request tracing.
pub fn create_router<T>(apis: Router, cors: &CorsConfig) -> Router
where
    T: OpenApi + 'static,
{
    let cors = Arc::new(cors.clone());
    info!(origins = ?cors.allowed_origins, "CORS configured");

    Router::new()
        .merge(SwaggerUi::new(DOCS_PATH).url(OPENAPI_JSON_PATH, T::openapi()))
        .nest("/api", apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(middleware::from_fn_with_state(cors.clone(), enforce_origin))
        .layer(create_cors_layer(&cors))
        .layer(CompressionLayer::new())
}

/// Serves `router` until SIGINT/SIGTERM, lets in-flight requests finish, then
/// runs `cleanup` within `shutdown_timeout`.
///
/// ```ignore
/// let cleanup = async move { close_postgres(db, "main").await };
/// create_production_app(router, &config, Duration::from_secs(30), cleanup).await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let (coordinator, _rx) = ShutdownCoordinator::new();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    // Returns once in-flight requests have drained
    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(coordinated_shutdown(coordinator))
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
    match tokio::time::timeout(shutdown_timeout, cleanup).await {
        Ok(()) => info!("Cleanup completed successfully"),
        Err(_) => tracing::warn!(
            "Cleanup exceeded timeout of {:?}, forcing shutdown",
            shutdown_timeout
        ),
    }

    serve_result
}
