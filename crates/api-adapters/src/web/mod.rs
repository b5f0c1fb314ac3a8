//! # Axum web surface
//!
//! Route table, shared state, and the middleware stack. Paths mirror the
//! public API: `/auth`, `/posts`, `/user`, `/settings`.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::{Json, Router};
use domains::ports::TokenIssuer;
use serde_json::json;
use services::{AccountService, PostService, SocialService};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use middleware::LoginRateLimiter;

/// State shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<AccountService>,
    pub social: Arc<SocialService>,
    pub posts: Arc<PostService>,
    pub tokens: Arc<dyn TokenIssuer>,
    pub login_limiter: Arc<LoginRateLimiter>,
}

/// Builds the full application router with its middleware stack.
pub fn app(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/signup", post(handlers::auth::signup))
        .route(
            "/login",
            post(handlers::auth::login)
                .layer(from_fn_with_state(state.clone(), middleware::login_rate_limit)),
        );

    let post_routes = Router::new()
        .route("/create", post(handlers::posts::create))
        .route("/like", post(handlers::posts::like))
        .route("/unlike", post(handlers::posts::unlike))
        .route("/{post_id}", get(handlers::posts::get_post));

    let user_routes = Router::new()
        .route(
            "/me",
            get(handlers::users::me).patch(handlers::users::update_me),
        )
        .route("/{username}", get(handlers::users::profile))
        .route(
            "/{username}/follow",
            post(handlers::users::follow).delete(handlers::users::unfollow),
        )
        .route("/{username}/followers", get(handlers::users::followers))
        .route("/{username}/following", get(handlers::users::following))
        .route("/{username}/posts", get(handlers::users::posts_by))
        .route(
            "/{username}/posts/{post_id}/replies",
            get(handlers::users::replies),
        )
        .route("/{username}/liked-posts", get(handlers::users::liked_posts));

    let settings_routes = Router::new()
        .route("/", get(handlers::settings::get_settings))
        .route("/profile", axum::routing::patch(handlers::settings::update_profile))
        .route("/email", axum::routing::patch(handlers::settings::update_email))
        .route("/password", axum::routing::patch(handlers::settings::update_password));

    Router::new()
        .route("/", get(index))
        .nest("/auth", auth_routes)
        .nest("/posts", post_routes)
        .nest("/user", user_routes)
        .nest("/settings", settings_routes)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(middleware::cors_policy())
        .with_state(state)
}

async fn index() -> Json<serde_json::Value> {
    Json(json!({ "message": "v1 is /v1/:route" }))
}
