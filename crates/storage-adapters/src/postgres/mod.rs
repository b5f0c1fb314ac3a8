//! # PostgreSQL adapters
//!
//! One repo struct per store port, all sharing the same `PgPool`.
//! Queries are runtime-checked `query_as` calls against row structs; the
//! mapping between SQL rows and domain models stays in this module.

mod follows;
mod likes;
mod posts;
mod users;

pub use follows::PgFollowRepo;
pub use likes::PgLikeRepo;
pub use posts::PgPostRepo;
pub use users::PgUserRepo;

use domains::AppError;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Embedded migrations, applied at startup by the composition root.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Store failures never reach the caller verbatim; a unique-constraint hit
/// becomes a Conflict, everything else a logged Internal.
pub(crate) fn map_insert_err(err: sqlx::Error, conflict_msg: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return AppError::Conflict(conflict_msg.to_string());
        }
    }
    internal(err)
}

pub(crate) fn internal(err: sqlx::Error) -> AppError {
    tracing::error!(error = %err, "store operation failed");
    AppError::Internal(err.to_string())
}
