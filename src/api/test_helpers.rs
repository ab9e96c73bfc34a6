//! Shared fixtures for driving the router over the in-memory backend

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use crate::api::router::create_router_with_state;
use crate::api::state::AppState;
use crate::infrastructure::api_key::{ApiKeyService, InMemoryApiKeyRepository};
use crate::infrastructure::auth::{JwtSessionService, SessionConfig};
use crate::infrastructure::project::{InMemoryProjectRepository, ProjectService};
use crate::infrastructure::user::{Argon2PasswordHasher, InMemoryUserRepository, UserService};

pub const TEST_PASSWORD: &str = "password123";

pub fn test_state() -> AppState {
    AppState {
        user_service: Arc::new(UserService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(Argon2PasswordHasher::new()),
        )),
        api_key_service: Arc::new(ApiKeyService::new(Arc::new(InMemoryApiKeyRepository::new()))),
        project_service: Arc::new(ProjectService::new(Arc::new(
            InMemoryProjectRepository::new(),
        ))),
        session_service: Arc::new(JwtSessionService::new(SessionConfig::new(
            "test-secret-key-12345",
            72,
        ))),
        cookie_secure: false,
    }
}

pub fn test_router() -> Router {
    create_router_with_state(test_state())
}

/// Send a request, returning the status and parsed JSON body
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);

    (status, json)
}

/// Sign up and log in, returning the raw Set-Cookie header value
pub async fn signup_and_login_raw(app: &Router, name: &str, email: &str) -> String {
    let (status, _) = send(
        app,
        "POST",
        "/api/user/signup",
        None,
        Some(serde_json::json!({
            "name": name,
            "email": email,
            "password": TEST_PASSWORD,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let request = Request::builder()
        .method("POST")
        .uri("/api/user/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::json!({"email": email, "password": TEST_PASSWORD}).to_string(),
        ))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login sets the session cookie")
        .to_str()
        .unwrap()
        .to_string()
}

/// Sign up and log in, returning the `token=...` cookie pair
pub async fn signup_and_login(app: &Router, name: &str, email: &str) -> String {
    let set_cookie = signup_and_login_raw(app, name, email).await;
    set_cookie
        .split(';')
        .next()
        .expect("cookie pair")
        .to_string()
}
