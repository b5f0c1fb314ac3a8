//! HTTP-surface tests: routing, the auth extractor, error statuses, and
//! the login throttle, driven through `tower::ServiceExt::oneshot` with
//! mocked ports behind real services.

use std::sync::Arc;
use std::time::Duration;

use api_adapters::web::middleware::LoginRateLimiter;
use api_adapters::web::{app, AppState};
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use domains::models::User;
use domains::ports::{
    MockCredentialHasher, MockFollowRepo, MockLikeRepo, MockPostRepo, MockTokenIssuer,
    MockUserRepo,
};
use domains::AppError;
use services::{AccountService, PasswordPolicy, PostService, SocialService};
use tower::ServiceExt;

fn sample_user(id: i64, username: &str) -> User {
    User {
        id,
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: "stored-hash-material".to_string(),
        display_name: None,
        bio: None,
        flags: 0,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

struct Mocks {
    users: MockUserRepo,
    follows: MockFollowRepo,
    posts: MockPostRepo,
    likes: MockLikeRepo,
    hasher: MockCredentialHasher,
    tokens: MockTokenIssuer,
}

impl Default for Mocks {
    fn default() -> Self {
        Self {
            users: MockUserRepo::new(),
            follows: MockFollowRepo::new(),
            posts: MockPostRepo::new(),
            likes: MockLikeRepo::new(),
            hasher: MockCredentialHasher::new(),
            tokens: MockTokenIssuer::new(),
        }
    }
}

fn make_app(mocks: Mocks) -> Router {
    let users: Arc<dyn domains::ports::UserRepo> = Arc::new(mocks.users);
    let follows: Arc<dyn domains::ports::FollowRepo> = Arc::new(mocks.follows);
    let posts: Arc<dyn domains::ports::PostRepo> = Arc::new(mocks.posts);
    let likes: Arc<dyn domains::ports::LikeRepo> = Arc::new(mocks.likes);

    let accounts = Arc::new(AccountService::new(
        users.clone(),
        follows.clone(),
        Arc::new(mocks.hasher),
        PasswordPolicy::default(),
        None,
    ));
    let social = Arc::new(SocialService::new(users.clone(), follows.clone()));
    let post_service = Arc::new(PostService::new(posts, users, likes));

    app(AppState {
        accounts,
        social,
        posts: post_service,
        tokens: Arc::new(mocks.tokens),
        login_limiter: Arc::new(LoginRateLimiter::new(5, Duration::from_secs(900))),
    })
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn root_serves_the_index_message() {
    let router = make_app(Mocks::default());
    let response = router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "v1 is /v1/:route");
}

#[tokio::test]
async fn missing_token_is_rejected_before_the_body_is_read() {
    let router = make_app(Mocks::default());
    let response = router
        .oneshot(json_request(
            "POST",
            "/posts/create",
            serde_json::json!({ "content": "hello" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "No token provided");
}

#[tokio::test]
async fn invalid_token_is_unauthorized() {
    let mut mocks = Mocks::default();
    mocks
        .tokens
        .expect_verify()
        .returning(|_| Err(AppError::Unauthorized("Invalid token".to_string())));
    let router = make_app(mocks);

    let mut request = json_request("GET", "/user/me", serde_json::json!({}));
    *request.body_mut() = Body::empty();
    request
        .headers_mut()
        .insert(header::AUTHORIZATION, "Bearer bogus".parse().unwrap());

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Invalid token");
}

#[tokio::test]
async fn unknown_profile_is_not_found() {
    let mut mocks = Mocks::default();
    mocks.tokens.expect_verify().returning(|_| Ok(7));
    mocks.users.expect_find_by_username().returning(|_| Ok(None));
    let router = make_app(mocks);

    let response = router
        .oneshot(
            Request::get("/user/ghost")
                .header(header::AUTHORIZATION, "Bearer token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "User not found");
}

#[tokio::test]
async fn signup_returns_201_and_never_the_hash() {
    let mut mocks = Mocks::default();
    mocks.users.expect_username_taken().returning(|_| Ok(false));
    mocks.users.expect_email_taken().returning(|_| Ok(false));
    mocks
        .hasher
        .expect_hash()
        .returning(|_| Ok("stored-hash-material".to_string()));
    mocks
        .users
        .expect_create()
        .returning(|new_user| Ok(sample_user(1, &new_user.username)));
    let router = make_app(mocks);

    let response = router
        .oneshot(json_request(
            "POST",
            "/auth/signup",
            serde_json::json!({
                "username": "ferris",
                "email": "ferris@example.com",
                "password": "Correct-Horse-7"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "User created successfully");
    assert_eq!(json["user"]["username"], "ferris");
    assert!(!json.to_string().contains("stored-hash-material"));
}

#[tokio::test]
async fn weak_signup_password_is_a_validation_error() {
    let router = make_app(Mocks::default());
    let response = router
        .oneshot(json_request(
            "POST",
            "/auth/signup",
            serde_json::json!({
                "username": "ferris",
                "email": "ferris@example.com",
                "password": "weak"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn sixth_login_attempt_in_the_window_is_throttled() {
    let mut mocks = Mocks::default();
    mocks.users.expect_find_by_username().returning(|_| Ok(None));
    let router = make_app(mocks);

    let attempt = || {
        json_request(
            "POST",
            "/auth/login",
            serde_json::json!({ "username": "ferris", "password": "whatever" }),
        )
    };

    for _ in 0..5 {
        let response = router.clone().oneshot(attempt()).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    let response = router.oneshot(attempt()).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn login_failure_does_not_reveal_whether_the_account_exists() {
    let mut mocks = Mocks::default();
    mocks.users.expect_find_by_username().returning(|username| {
        Ok(match username {
            "ferris" => Some(sample_user(1, "ferris")),
            _ => None,
        })
    });
    mocks.hasher.expect_verify().returning(|_, _| Ok(false));
    let router = make_app(mocks);

    let unknown = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/login",
            serde_json::json!({ "username": "ghost", "password": "x" }),
        ))
        .await
        .unwrap();
    let wrong_password = router
        .oneshot(json_request(
            "POST",
            "/auth/login",
            serde_json::json!({ "username": "ferris", "password": "x" }),
        ))
        .await
        .unwrap();

    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(unknown).await["error"],
        body_json(wrong_password).await["error"]
    );
}
