//! Custom middleware: login throttling and the CORS policy.

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request, State};
use axum::http::{header, Method};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use dashmap::DashMap;
use domains::AppError;
use tower_http::cors::{Any, CorsLayer};

use super::error::ApiError;
use super::AppState;

/// Fixed-window attempt counter per source address. State is in-process;
/// a multi-instance deployment would move this behind a shared store.
pub struct LoginRateLimiter {
    max_attempts: u32,
    window: Duration,
    attempts: DashMap<String, (Instant, u32)>,
}

impl LoginRateLimiter {
    pub fn new(max_attempts: u32, window: Duration) -> Self {
        Self {
            max_attempts,
            window,
            attempts: DashMap::new(),
        }
    }

    /// Records one attempt for `key` and reports whether it is allowed.
    pub fn allow(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut entry = self.attempts.entry(key.to_string()).or_insert((now, 0));
        let (window_start, count) = *entry;

        if now.duration_since(window_start) >= self.window {
            *entry = (now, 1);
            true
        } else if count >= self.max_attempts {
            false
        } else {
            entry.1 = count + 1;
            true
        }
    }
}

/// Applied to the login route only: every attempt counts, successful or not.
pub async fn login_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let source = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    if !state.login_limiter.allow(&source) {
        return ApiError::from(AppError::RateLimitExceeded(
            "Too many login attempts from this IP, please try again after 15 minutes"
                .to_string(),
        ))
        .into_response();
    }

    next.run(request).await
}

/// CORS for browser clients: the API may live on a different origin than
/// the UI.
pub fn cors_policy() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limiter_blocks_after_max_attempts_in_window() {
        let limiter = LoginRateLimiter::new(3, Duration::from_secs(60));
        assert!(limiter.allow("10.0.0.1"));
        assert!(limiter.allow("10.0.0.1"));
        assert!(limiter.allow("10.0.0.1"));
        assert!(!limiter.allow("10.0.0.1"));
        // Other sources are unaffected.
        assert!(limiter.allow("10.0.0.2"));
    }

    #[test]
    fn window_expiry_resets_the_counter() {
        let limiter = LoginRateLimiter::new(1, Duration::from_millis(10));
        assert!(limiter.allow("10.0.0.1"));
        assert!(!limiter.allow("10.0.0.1"));
        std::thread::sleep(Duration::from_millis(15));
        assert!(limiter.allow("10.0.0.1"));
    }
}
