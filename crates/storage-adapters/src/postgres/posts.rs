//! Post persistence. Replies reference their parent through `reply_to`;
//! the store does not enforce acyclicity, the thread assembler does.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domains::models::{NewPost, Post};
use domains::ports::PostRepo;
use domains::Result;
use sqlx::PgPool;

use super::internal;

const POST_COLUMNS: &str = "id, user_id, content, reply_to, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    user_id: i64,
    content: String,
    reply_to: Option<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: row.id,
            user_id: row.user_id,
            content: row.content,
            reply_to: row.reply_to,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct PgPostRepo {
    pool: PgPool,
}

impl PgPostRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepo for PgPostRepo {
    async fn create(&self, new_post: NewPost) -> Result<Post> {
        let row: PostRow = sqlx::query_as(
            "INSERT INTO posts (user_id, content, reply_to) \
             VALUES ($1, $2, $3) \
             RETURNING id, user_id, content, reply_to, created_at, updated_at",
        )
        .bind(new_post.user_id)
        .bind(&new_post.content)
        .bind(new_post.reply_to)
        .fetch_one(&self.pool)
        .await
        .map_err(internal)?;
        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>> {
        let row: Option<PostRow> =
            sqlx::query_as(&format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(internal)?;
        Ok(row.map(Into::into))
    }

    async fn list_by_author(&self, user_id: i64) -> Result<Vec<Post>> {
        let rows: Vec<PostRow> = sqlx::query_as(&format!(
            "SELECT {POST_COLUMNS} FROM posts \
             WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(internal)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_replies(&self, post_id: i64) -> Result<Vec<Post>> {
        let rows: Vec<PostRow> = sqlx::query_as(&format!(
            "SELECT {POST_COLUMNS} FROM posts \
             WHERE reply_to = $1 ORDER BY created_at DESC"
        ))
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(internal)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn reply_count(&self, post_id: i64) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE reply_to = $1")
            .bind(post_id)
            .fetch_one(&self.pool)
            .await
            .map_err(internal)
    }

    async fn list_liked_by(&self, user_id: i64) -> Result<Vec<Post>> {
        let rows: Vec<PostRow> = sqlx::query_as(
            "SELECT p.id, p.user_id, p.content, p.reply_to, p.created_at, p.updated_at \
             FROM posts p \
             JOIN likes l ON l.post_id = p.id \
             WHERE l.user_id = $1 \
             ORDER BY p.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(internal)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
