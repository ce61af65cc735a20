//! Migration CLI tool.
//!
//! Reads `DATABASE_URL` and applies or reverts the schema, e.g.
//! `migration up` or `migration fresh`.

use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt().with_env_filter("info").init();

    tracing::info!("Running lostfound schema migrations");
    cli::run_cli(migration::Migrator).await;
}
