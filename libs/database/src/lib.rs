//! PostgreSQL connection management for the products service.
//!
//! Wraps SeaORM with the pool defaults the API uses, migration helpers and a
//! `SELECT 1` readiness probe.
//!
//! # Features
//!
//! - `postgres` (default) - SeaORM connector, migrations and health check
//! - `config` - load [`postgres::PostgresConfig`] through `core_config::FromEnv`
//!
//! ```ignore
//! use database::postgres::{self, PostgresConfig};
//!
//! let db = postgres::connect_lazy(PostgresConfig::new(url))?;
//! postgres::run_migrations::<migration::Migrator>(&db, "products_api").await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult, RetryConfig, retry_with_backoff};
