//! HTTP middleware: CORS, origin enforcement and security headers.
//!
//! ```ignore
//! use axum_helpers::http::{create_cors_layer, enforce_origin, security_headers};
//!
//! let app = Router::new()
//!     .layer(axum::middleware::from_fn(security_headers))
//!     .layer(axum::middleware::from_fn_with_state(cors.clone(), enforce_origin))
//!     .layer(create_cors_layer(&cors));
//! ```

pub mod cors;
pub mod security;

pub use cors::{create_cors_layer, enforce_origin};
pub use security::security_headers;
