//! `/user` — the caller's own account, public profiles, the follow graph,
//! and per-user post listings.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::web::auth::AuthUser;
use crate::web::error::ApiError;
use crate::web::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMeRequest {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

pub async fn me(
    AuthUser(user_id): AuthUser,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.accounts.me(user_id).await?))
}

pub async fn update_me(
    AuthUser(user_id): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UpdateMeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let view = state
        .accounts
        .update_me(user_id, req.display_name, req.bio)
        .await?;
    Ok(Json(view))
}

pub async fn profile(
    AuthUser(viewer_id): AuthUser,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let view = state.social.profile(&username, Some(viewer_id)).await?;
    Ok(Json(view))
}

pub async fn follow(
    AuthUser(viewer_id): AuthUser,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.social.follow(viewer_id, &username).await?;
    Ok(Json(json!({ "message": "Successfully followed user" })))
}

pub async fn unfollow(
    AuthUser(viewer_id): AuthUser,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.social.unfollow(viewer_id, &username).await?;
    Ok(Json(json!({ "message": "Successfully unfollowed user" })))
}

pub async fn followers(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.social.followers(&username).await?))
}

pub async fn following(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.social.following(&username).await?))
}

pub async fn posts_by(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.posts.posts_by(&username).await?))
}

pub async fn replies(
    State(state): State<AppState>,
    Path((username, post_id)): Path<(String, i64)>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.posts.replies(&username, post_id).await?))
}

pub async fn liked_posts(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.posts.liked_posts(&username).await?))
}
