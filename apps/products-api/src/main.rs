//! Products API - REST server and fixture reset

use axum_helpers::server::{close_postgres, create_production_app};
use clap::{Parser, Subcommand};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{
    DatabaseConnection, check_health_detailed, connect_from_config_with_retry, connect_lazy,
    reset_schema, run_migrations,
};
use migration::Migrator;
use std::time::Duration;
use tracing::{error, info};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

/// Budget for closing the pool after the server stops
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Parser)]
#[command(name = "products_api")]
#[command(about = "REST API for products")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Default)]
enum Commands {
    /// Run the HTTP server (default)
    #[default]
    Serve,

    /// Drop every table and re-create the schema, leaving it empty
    Reset,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    init_tracing(&config.environment);

    match cli.command.unwrap_or_default() {
        Commands::Serve => serve(config).await,
        Commands::Reset => reset(config)
            .await
            .inspect_err(|e| error!("Failed to reset database: {:?}", e)),
    }
}

async fn serve(config: Config) -> eyre::Result<()> {
    let db = connect_lazy(config.database.clone()).await?;
    prepare_database(&db).await;

    let state = AppState { config, db };
    let app = api::app(&state);

    info!(
        "Starting {} v{} on port {}",
        state.config.app.name, state.config.app.version, state.config.server.port
    );

    let db = state.db.clone();
    create_production_app(app, &state.config.server, SHUTDOWN_TIMEOUT, async move {
        close_postgres(db, "main").await;
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Products API shutdown complete");
    Ok(())
}

/// Pings the database and applies pending migrations.
///
/// Failures are only logged: the server still starts and requests fail with
/// 500 until the database is reachable.
async fn prepare_database(db: &DatabaseConnection) {
    let status = check_health_detailed(db).await;
    if !status.healthy {
        error!(
            response_time_ms = status.response_time_ms,
            "Hubo un error al conectar a la BD: {}",
            status.message.unwrap_or_default()
        );
        return;
    }
    info!(response_time_ms = status.response_time_ms, "Conexión exitosa a la BD");

    if let Err(e) = run_migrations::<Migrator>(db, "products_api").await {
        error!("Failed to apply migrations: {}", e);
    }
}

async fn reset(config: Config) -> eyre::Result<()> {
    let db = connect_from_config_with_retry(config.database, None).await?;
    reset_schema::<Migrator>(&db).await?;
    info!("Datos eliminados correctamente");

    close_postgres(db, "main").await;
    Ok(())
}
