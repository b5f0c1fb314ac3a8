//! Like-set persistence. The (user, post) primary key turns a duplicate
//! like into a constraint violation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domains::models::Like;
use domains::ports::LikeRepo;
use domains::Result;
use sqlx::PgPool;

use super::{internal, map_insert_err};

#[derive(sqlx::FromRow)]
struct LikeRow {
    user_id: i64,
    post_id: i64,
    created_at: DateTime<Utc>,
}

pub struct PgLikeRepo {
    pool: PgPool,
}

impl PgLikeRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LikeRepo for PgLikeRepo {
    async fn create(&self, user_id: i64, post_id: i64) -> Result<Like> {
        let row: LikeRow = sqlx::query_as(
            "INSERT INTO likes (user_id, post_id) \
             VALUES ($1, $2) \
             RETURNING user_id, post_id, created_at",
        )
        .bind(user_id)
        .bind(post_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| map_insert_err(err, "like already exists"))?;
        Ok(Like {
            user_id: row.user_id,
            post_id: row.post_id,
            created_at: row.created_at,
        })
    }

    async fn delete(&self, user_id: i64, post_id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM likes WHERE user_id = $1 AND post_id = $2")
            .bind(user_id)
            .bind(post_id)
            .execute(&self.pool)
            .await
            .map_err(internal)?;
        Ok(result.rows_affected())
    }

    async fn count_for_post(&self, post_id: i64) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE post_id = $1")
            .bind(post_id)
            .fetch_one(&self.pool)
            .await
            .map_err(internal)
    }
}
