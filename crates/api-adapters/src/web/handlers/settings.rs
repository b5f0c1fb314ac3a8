//! `/settings` — account settings reads and the three patch endpoints.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use domains::models::ProfileChanges;
use serde::Deserialize;
use serde_json::json;

use crate::web::auth::AuthUser;
use crate::web::error::ApiError;
use crate::web::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatchRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EmailPatchRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordPatchRequest {
    pub current_password: String,
    pub new_password: String,
}

pub async fn get_settings(
    AuthUser(user_id): AuthUser,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.accounts.settings(user_id).await?))
}

pub async fn update_profile(
    AuthUser(user_id): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ProfilePatchRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let view = state
        .accounts
        .update_settings_profile(
            user_id,
            ProfileChanges {
                username: req.username,
                display_name: req.display_name,
                bio: req.bio,
            },
        )
        .await?;
    Ok(Json(view))
}

pub async fn update_email(
    AuthUser(user_id): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<EmailPatchRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .accounts
        .change_email(user_id, &req.email, &req.password)
        .await?;
    Ok(Json(json!({ "message": "Email updated successfully" })))
}

pub async fn update_password(
    AuthUser(user_id): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<PasswordPatchRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .accounts
        .change_password(user_id, &req.current_password, &req.new_password)
        .await?;
    Ok(Json(json!({ "message": "Password updated successfully" })))
}
