//! Client-facing error messages shared by every route.

/// Body of every 500 response; the cause is only logged
pub const INTERNAL_ERROR: &str = "Error interno del servidor";

/// Fallback for routes that do not exist
pub const ROUTE_NOT_FOUND: &str = "Recurso no encontrado";

/// Request came from an origin outside `FRONTEND_URL`
pub const CORS_REJECTED: &str = "Error de CORS";
