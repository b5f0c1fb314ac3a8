//! `/posts` — creation, likes, and single-post reads.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::web::auth::AuthUser;
use crate::web::error::ApiError;
use crate::web::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub content: String,
    #[serde(default)]
    pub reply_to: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeRequest {
    pub post_id: i64,
}

pub async fn create(
    AuthUser(user_id): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state
        .posts
        .create_post(user_id, &req.content, req.reply_to)
        .await?;
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn like(
    AuthUser(user_id): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<LikeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.posts.like(user_id, req.post_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Post liked successfully" })),
    ))
}

pub async fn unlike(
    AuthUser(user_id): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<LikeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.posts.unlike(user_id, req.post_id).await?;
    Ok(Json(json!({ "message": "Post unliked successfully" })))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state.posts.get_post(post_id).await?;
    Ok(Json(post))
}
