//! Embedded schema migrations.

use diesel::prelude::*;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Apply any pending migrations over a short-lived synchronous connection.
///
/// Runs once at startup; callers should wrap it in `spawn_blocking` when on
/// an async runtime.
pub fn run_pending_migrations(database_url: &str) -> Result<(), String> {
    let mut conn = PgConnection::establish(database_url)
        .map_err(|err| format!("failed to connect for migrations: {err}"))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map(|applied| {
            if !applied.is_empty() {
                tracing::info!(count = applied.len(), "applied pending migrations");
            }
        })
        .map_err(|err| format!("failed to run migrations: {err}"))
}
