//! Database Migrations
//!
//! Migration utilities using refinery for tokio-postgres. Migrations are
//! embedded at compile time from the `migrations/` directory and run once
//! during server startup, before any request is served.

use anyhow::{Context, Result};
use deadpool_postgres::Pool;
use std::ops::DerefMut;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Run all pending migrations
pub async fn run_migrations(pool: &Pool) -> Result<()> {
    tracing::info!("🔄 Running database migrations...");

    let mut client = pool
        .get()
        .await
        .context("Failed to get connection for migrations")?;

    let report = embedded::migrations::runner()
        .run_async(client.deref_mut().deref_mut())
        .await
        .context("Failed to apply migrations")?;

    for migration in report.applied_migrations() {
        tracing::info!("Applied migration: {}", migration.name());
    }

    tracing::info!("✅ Database migrations completed successfully");
    Ok(())
}
