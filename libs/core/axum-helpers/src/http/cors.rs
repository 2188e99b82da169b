use axum::{
    extract::{Request, State},
    http::{header, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use core_config::cors::CorsConfig;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::errors::{messages, AppError};

/// CORS headers and preflight answers for the origins in `config`.
///
/// - Methods: GET, POST, PUT, PATCH, DELETE, OPTIONS
/// - Headers: Content-Type, Accept, Authorization
/// - Max age: 1 hour
pub fn create_cors_layer(config: &Arc<CorsConfig>) -> CorsLayer {
    let allowed = Arc::clone(config);

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin, _| {
            origin
                .to_str()
                .map(|origin| allowed.is_allowed(origin))
                .unwrap_or(false)
        }))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
        .max_age(Duration::from_secs(3600))
}

/// Rejects requests whose `Origin` is not allowed with
/// `403 {"error": "Error de CORS"}`.
///
/// Requests without an `Origin` header (curl, server-to-server) pass through.
pub async fn enforce_origin(
    State(config): State<Arc<CorsConfig>>,
    request: Request,
    next: Next,
) -> Response {
    let rejected = request
        .headers()
        .get(header::ORIGIN)
        .map(|origin| {
            origin
                .to_str()
                .map(|origin| !config.is_allowed(origin))
                .unwrap_or(true)
        })
        .unwrap_or(false);

    if rejected {
        tracing::warn!(origin = ?request.headers().get(header::ORIGIN), "Origin not allowed");
        return AppError::Forbidden(messages::CORS_REJECTED.to_string()).into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::{self, StatusCode}, middleware, routing::get, Router};
    use tower::ServiceExt;

    fn app(origins: &[&str]) -> Router {
        let config = Arc::new(CorsConfig::new(origins.iter().copied()));
        Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(middleware::from_fn_with_state(config.clone(), enforce_origin))
            .layer(create_cors_layer(&config))
    }

    fn request(origin: Option<&str>) -> http::Request<Body> {
        let mut builder = http::Request::builder().uri("/");
        if let Some(origin) = origin {
            builder = builder.header(header::ORIGIN, origin);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_allowed_origin_gets_cors_headers() {
        let response = app(&["http://localhost:5173"])
            .oneshot(request(Some("http://localhost:5173")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:5173"
        );
    }

    #[tokio::test]
    async fn test_foreign_origin_is_forbidden() {
        let response = app(&["http://localhost:5173"])
            .oneshot(request(Some("http://evil.example")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[tokio::test]
    async fn test_request_without_origin_passes() {
        let response = app(&[]).oneshot(request(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_empty_allow_list_rejects_browsers() {
        let response = app(&[])
            .oneshot(request(Some("http://localhost:5173")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
