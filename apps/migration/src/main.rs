//! Migration CLI tool.
//!
//! Reads `DATABASE_URL` and applies or rolls back the blog schema, e.g.
//! `migration up` or `migration status`.

use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt().with_env_filter("info").init();

    tracing::info!("Running blog migrations");
    cli::run_cli(migration::Migrator).await;
}
