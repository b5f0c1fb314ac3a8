//! The authenticated-caller extractor. Verification happens once per
//! request here; handlers receive the caller id as an explicit value
//! rather than reading it from ambient state.

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use domains::AppError;

use super::error::ApiError;
use super::AppState;

/// The verified identity behind a `Authorization: Bearer <token>` header.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub i64);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let bearer = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        let Some(token) = bearer else {
            return Err(AppError::Unauthorized("No token provided".to_string()).into());
        };

        let user_id = state
            .tokens
            .verify(token)
            .map_err(|_| AppError::Unauthorized("Invalid token".to_string()))?;
        Ok(AuthUser(user_id))
    }
}
