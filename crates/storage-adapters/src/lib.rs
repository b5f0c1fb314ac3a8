//! # storage-adapters
//!
//! Store-port implementations. The PostgreSQL backend (feature
//! `db-postgres`) maps each domain port onto `sqlx` queries and surfaces
//! unique-constraint violations as `AppError::Conflict`.

#[cfg(feature = "db-postgres")]
pub mod postgres;

#[cfg(feature = "db-postgres")]
pub use postgres::{connect, PgFollowRepo, PgLikeRepo, PgPostRepo, PgUserRepo, MIGRATOR};
