//! `migration up | down | fresh | status`, reading `DATABASE_URL`.
//!
//! `fresh` drops every table and rebuilds the schema, which empties the
//! products table.

use migration::Migrator;
use sea_orm_migration::cli;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
