//! Account persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domains::models::{NewUser, ProfileChanges, User};
use domains::ports::UserRepo;
use domains::{AppError, Result};
use sqlx::PgPool;

use super::{internal, map_insert_err};

const USER_COLUMNS: &str =
    "id, username, email, password_hash, display_name, bio, flags, created_at, updated_at";

#[derive(sqlx::FromRow)]
pub(crate) struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub flags: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
            display_name: row.display_name,
            bio: row.bio,
            flags: row.flags,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct PgUserRepo {
    pool: PgPool,
}

impl PgUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepo for PgUserRepo {
    async fn create(&self, new_user: NewUser) -> Result<User> {
        let row: UserRow = sqlx::query_as(
            "INSERT INTO users (username, email, password_hash) \
             VALUES ($1, $2, $3) \
             RETURNING id, username, email, password_hash, display_name, bio, flags, \
                       created_at, updated_at",
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| map_insert_err(err, "Username or email already taken"))?;
        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(internal)?;
        Ok(row.map(Into::into))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(internal)?;
        Ok(row.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(internal)?;
        Ok(row.map(Into::into))
    }

    async fn username_taken(&self, username: &str) -> Result<bool> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM users WHERE lower(username) = lower($1))",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await
        .map_err(internal)
    }

    async fn email_taken(&self, email: &str) -> Result<bool> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(internal)
    }

    async fn update_profile(&self, id: i64, changes: ProfileChanges) -> Result<User> {
        // COALESCE keeps the stored value for fields the patch omits.
        let row: UserRow = sqlx::query_as(
            "UPDATE users SET \
                 username = COALESCE($2, username), \
                 display_name = COALESCE($3, display_name), \
                 bio = COALESCE($4, bio), \
                 updated_at = now() \
             WHERE id = $1 \
             RETURNING id, username, email, password_hash, display_name, bio, flags, \
                       created_at, updated_at",
        )
        .bind(id)
        .bind(&changes.username)
        .bind(&changes.display_name)
        .bind(&changes.bio)
        .fetch_one(&self.pool)
        .await
        .map_err(map_update_err)?;
        Ok(row.into())
    }

    async fn update_email(&self, id: i64, email: &str) -> Result<User> {
        let row: UserRow = sqlx::query_as(
            "UPDATE users SET email = $2, updated_at = now() \
             WHERE id = $1 \
             RETURNING id, username, email, password_hash, display_name, bio, flags, \
                       created_at, updated_at",
        )
        .bind(id)
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(map_update_err)?;
        Ok(row.into())
    }

    async fn update_password_hash(&self, id: i64, password_hash: &str) -> Result<User> {
        let row: UserRow = sqlx::query_as(
            "UPDATE users SET password_hash = $2, updated_at = now() \
             WHERE id = $1 \
             RETURNING id, username, email, password_hash, display_name, bio, flags, \
                       created_at, updated_at",
        )
        .bind(id)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(map_update_err)?;
        Ok(row.into())
    }
}

fn map_update_err(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::RowNotFound => AppError::NotFound("User not found".to_string()),
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("Username or email already taken".to_string())
        }
        _ => internal(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_on_a_missing_row_maps_to_not_found() {
        assert!(matches!(
            map_update_err(sqlx::Error::RowNotFound),
            AppError::NotFound(_)
        ));
    }

    #[test]
    fn other_store_failures_stay_internal() {
        assert!(matches!(
            map_update_err(sqlx::Error::PoolTimedOut),
            AppError::Internal(_)
        ));
    }
}
