//! # Chirp Binary
//!
//! The composition root: configuration, tracing, the connection pool and
//! migrations, adapter construction, service wiring, and the server loop.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use api_adapters::web::middleware::LoginRateLimiter;
use api_adapters::web::{app, AppState};
use auth_adapters::{ArgonCredentialHasher, JwtTokenIssuer};
use configs::AppConfig;
use domains::ports::{FollowRepo, LikeRepo, PostRepo, UserRepo};
use secrecy::ExposeSecret;
use services::{AccountService, PasswordPolicy, PostService, SocialService};
use storage_adapters::postgres::{
    connect, PgFollowRepo, PgLikeRepo, PgPostRepo, PgUserRepo, MIGRATOR,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load().context("loading configuration")?;

    // 1. Store: pool + migrations
    let pool = connect(
        config.database.url.expose_secret(),
        config.database.max_connections,
    )
    .await
    .context("connecting to postgres")?;
    MIGRATOR.run(&pool).await.context("running migrations")?;

    let users: Arc<dyn UserRepo> = Arc::new(PgUserRepo::new(pool.clone()));
    let follows: Arc<dyn FollowRepo> = Arc::new(PgFollowRepo::new(pool.clone()));
    let posts: Arc<dyn PostRepo> = Arc::new(PgPostRepo::new(pool.clone()));
    let likes: Arc<dyn LikeRepo> = Arc::new(PgLikeRepo::new(pool));

    // 2. Auth adapters
    let hasher = Arc::new(ArgonCredentialHasher::new());
    let tokens = Arc::new(JwtTokenIssuer::new(
        &config.auth.jwt_secret,
        config.auth.token_ttl_secs,
    ));

    // 3. Services
    let policy = PasswordPolicy::new(config.password_policy.min_length);
    let accounts = Arc::new(AccountService::new(
        users.clone(),
        follows.clone(),
        hasher,
        policy,
        config.auth.default_follow.clone(),
    ));
    let social = Arc::new(SocialService::new(users.clone(), follows));
    let post_service = Arc::new(PostService::new(posts, users, likes));

    let state = AppState {
        accounts,
        social,
        posts: post_service,
        tokens,
        login_limiter: Arc::new(LoginRateLimiter::new(
            config.rate_limit.login_max_attempts,
            Duration::from_secs(config.rate_limit.login_window_secs),
        )),
    };

    // 4. Serve. Connect-info feeds the login throttle its source addresses.
    let addr: SocketAddr = format!("{}:{}", config.http.host, config.http.port)
        .parse()
        .context("invalid http.host/http.port")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "chirp listening");

    axum::serve(
        listener,
        app(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("server terminated")?;

    Ok(())
}
