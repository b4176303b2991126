//! Embedded schema migrations applied at startup.

use diesel::Connection;
use diesel_async::AsyncPgConnection;
use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

/// Migrations compiled from `backend/migrations`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Failures raised while applying migrations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    /// A connection for the migration run could not be opened.
    #[error("failed to connect for migrations: {message}")]
    Connect {
        /// Underlying connection error text.
        message: String,
    },
    /// A migration failed to apply.
    #[error("failed to apply migrations: {message}")]
    Apply {
        /// Underlying migration error text.
        message: String,
    },
    /// The blocking migration task did not complete.
    #[error("migration task aborted: {message}")]
    Aborted {
        /// Join error text.
        message: String,
    },
}

/// Apply every pending migration and return how many ran.
///
/// Diesel's migration harness is synchronous, so the run happens on the
/// blocking pool over an async connection wrapper.
pub async fn run_pending_migrations(database_url: &str) -> Result<usize, MigrationError> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || {
        let mut conn = AsyncConnectionWrapper::<AsyncPgConnection>::establish(&url).map_err(
            |err| MigrationError::Connect {
                message: err.to_string(),
            },
        )?;
        conn.run_pending_migrations(MIGRATIONS)
            .map(|versions| versions.len())
            .map_err(|err| MigrationError::Apply {
                message: err.to_string(),
            })
    })
    .await
    .map_err(|err| MigrationError::Aborted {
        message: err.to_string(),
    })??;

    info!(applied, "database migrations complete");
    Ok(applied)
}
