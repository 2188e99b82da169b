//! Resource cleanup run after the server stops accepting connections.

use tracing::{error, info};

/// Closes a SeaORM pool, logging the outcome.
///
/// The pool would also close on drop; closing it explicitly lets in-flight
/// connections finish inside the shutdown budget.
pub async fn close_postgres(db: sea_orm::DatabaseConnection, name: &str) {
    match db.close().await {
        Ok(()) => info!("PostgreSQL pool '{}' closed", name),
        Err(e) => error!("Error closing PostgreSQL pool '{}': {}", name, e),
    }
}
