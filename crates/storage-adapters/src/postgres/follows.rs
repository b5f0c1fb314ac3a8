//! Follow-graph persistence. The (follower, following) primary key makes
//! duplicate edges a constraint violation rather than a read-then-write
//! race.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domains::models::{Follow, User};
use domains::ports::FollowRepo;
use domains::Result;
use sqlx::PgPool;

use super::users::UserRow;
use super::{internal, map_insert_err};

#[derive(sqlx::FromRow)]
struct FollowRow {
    follower_id: i64,
    following_id: i64,
    created_at: DateTime<Utc>,
}

pub struct PgFollowRepo {
    pool: PgPool,
}

impl PgFollowRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FollowRepo for PgFollowRepo {
    async fn create(&self, follower_id: i64, following_id: i64) -> Result<Follow> {
        let row: FollowRow = sqlx::query_as(
            "INSERT INTO follows (follower_id, following_id) \
             VALUES ($1, $2) \
             RETURNING follower_id, following_id, created_at",
        )
        .bind(follower_id)
        .bind(following_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| map_insert_err(err, "follow edge already exists"))?;
        Ok(Follow {
            follower_id: row.follower_id,
            following_id: row.following_id,
            created_at: row.created_at,
        })
    }

    async fn delete(&self, follower_id: i64, following_id: i64) -> Result<u64> {
        let result = sqlx::query(
            "DELETE FROM follows WHERE follower_id = $1 AND following_id = $2",
        )
        .bind(follower_id)
        .bind(following_id)
        .execute(&self.pool)
        .await
        .map_err(internal)?;
        Ok(result.rows_affected())
    }

    async fn exists(&self, follower_id: i64, following_id: i64) -> Result<bool> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM follows \
             WHERE follower_id = $1 AND following_id = $2)",
        )
        .bind(follower_id)
        .bind(following_id)
        .fetch_one(&self.pool)
        .await
        .map_err(internal)
    }

    async fn follower_count(&self, user_id: i64) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM follows WHERE following_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(internal)
    }

    async fn following_count(&self, user_id: i64) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM follows WHERE follower_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(internal)
    }

    async fn followers_of(&self, user_id: i64) -> Result<Vec<User>> {
        let rows: Vec<UserRow> = sqlx::query_as(
            "SELECT u.id, u.username, u.email, u.password_hash, u.display_name, u.bio, \
                    u.flags, u.created_at, u.updated_at \
             FROM users u \
             JOIN follows f ON f.follower_id = u.id \
             WHERE f.following_id = $1 \
             ORDER BY f.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(internal)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn following_of(&self, user_id: i64) -> Result<Vec<User>> {
        let rows: Vec<UserRow> = sqlx::query_as(
            "SELECT u.id, u.username, u.email, u.password_hash, u.display_name, u.bio, \
                    u.flags, u.created_at, u.updated_at \
             FROM users u \
             JOIN follows f ON f.following_id = u.id \
             WHERE f.follower_id = $1 \
             ORDER BY f.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(internal)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
