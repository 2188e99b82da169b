//! Custom extractors for Axum handlers.

pub mod validated;

pub use validated::{parse_body, Validated, ValidatedRequest};
