//! HTTP-level tests for the auth routes and the request gate.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderValue, StatusCode, header};
use axum_test::TestServer;
use serde_json::json;
use tokengate_models::SessionResponse;
use tokengate_server::config::AppConfig;
use tokengate_server::{AppState, REFRESH_COOKIE, REFRESH_ROUTE, router};

fn test_config() -> AppConfig {
    AppConfig {
        access_secret: "test-access-secret".into(),
        refresh_secret: "test-refresh-secret".into(),
        access_ttl: Duration::from_secs(900),
        refresh_ttl: Duration::from_secs(3600),
        listen_port: 0,
        client_origin: "http://localhost:5173".into(),
    }
}

fn test_server() -> TestServer {
    TestServer::new(router(Arc::new(AppState::demo(&test_config())))).unwrap()
}

fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {token}")).unwrap()
}

async fn login(server: &TestServer) -> axum_test::TestResponse {
    server
        .post("/login")
        .json(&json!({ "email": "jane@example.com", "password": "pass123" }))
        .await
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_returns_token_principal_and_httponly_cookie() {
    let server = test_server();

    let res = login(&server).await;
    res.assert_status_ok();

    let body: SessionResponse = res.json();
    assert!(!body.access_token.is_empty());
    assert_eq!(body.user.id, 1);
    assert_eq!(body.user.email, "jane@example.com");
    assert_eq!(body.user.name, "Jane");

    let cookie = res.cookie(REFRESH_COOKIE);
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.path(), Some(REFRESH_ROUTE));
    assert!(!cookie.value().is_empty());
}

#[tokio::test]
async fn login_with_wrong_password_sets_no_cookie() {
    let server = test_server();

    let res = server
        .post("/login")
        .json(&json!({ "email": "jane@example.com", "password": "wrong" }))
        .await;

    res.assert_status(StatusCode::UNAUTHORIZED);
    assert!(res.maybe_cookie(REFRESH_COOKIE).is_none());
}

#[tokio::test]
async fn login_with_unknown_user_is_indistinguishable() {
    let server = test_server();

    let known = server
        .post("/login")
        .json(&json!({ "email": "jane@example.com", "password": "wrong" }))
        .await;
    let unknown = server
        .post("/login")
        .json(&json!({ "email": "nobody@example.com", "password": "pass123" }))
        .await;

    known.assert_status(StatusCode::UNAUTHORIZED);
    unknown.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(known.text(), unknown.text());
}

// ---------------------------------------------------------------------------
// Protected resource
// ---------------------------------------------------------------------------

#[tokio::test]
async fn valid_access_token_reaches_the_resource() {
    let server = test_server();
    let body: SessionResponse = login(&server).await.json();

    let res = server
        .get("/me")
        .add_header(header::AUTHORIZATION, bearer(&body.access_token))
        .await;

    res.assert_status_ok();
    let me: serde_json::Value = res.json();
    assert_eq!(me["me"]["email"], "jane@example.com");
    assert_eq!(me["me"]["name"], "Jane");
}

#[tokio::test]
async fn missing_bearer_is_unauthorized() {
    let server = test_server();
    let res = server.get("/me").await;
    res.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn garbage_bearer_is_unauthorized() {
    let server = test_server();
    let res = server
        .get("/me")
        .add_header(header::AUTHORIZATION, bearer("not-a-token"))
        .await;
    res.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn refresh_token_is_not_accepted_as_bearer() {
    let server = test_server();
    let refresh_cookie = login(&server).await.cookie(REFRESH_COOKIE);

    // The cookie value is a signed refresh token; cross-use must fail.
    let res = server
        .get("/me")
        .add_header(header::AUTHORIZATION, bearer(refresh_cookie.value()))
        .await;
    res.assert_status(StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Refresh
// ---------------------------------------------------------------------------

#[tokio::test]
async fn refresh_mints_a_working_access_token() {
    let server = test_server();
    let refresh_cookie = login(&server).await.cookie(REFRESH_COOKIE);

    let res = server.get(REFRESH_ROUTE).add_cookie(refresh_cookie).await;
    res.assert_status_ok();

    let body: SessionResponse = res.json();
    assert_eq!(body.user.name, "Jane");

    let me = server
        .get("/me")
        .add_header(header::AUTHORIZATION, bearer(&body.access_token))
        .await;
    me.assert_status_ok();
}

#[tokio::test]
async fn refresh_without_cookie_is_unauthorized() {
    let server = test_server();
    let res = server.get(REFRESH_ROUTE).await;
    res.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn refresh_with_tampered_cookie_is_unauthorized() {
    let server = test_server();
    let mut cookie = login(&server).await.cookie(REFRESH_COOKIE);
    cookie.set_value(format!("{}x", cookie.value()));

    let res = server.get(REFRESH_ROUTE).add_cookie(cookie).await;
    res.assert_status(StatusCode::UNAUTHORIZED);
    // Failure must not clear the cookie.
    assert!(res.maybe_cookie(REFRESH_COOKIE).is_none());
}

#[tokio::test]
async fn access_token_is_not_accepted_for_refresh() {
    let server = test_server();
    let body: SessionResponse = login(&server).await.json();

    let mut forged = login(&server).await.cookie(REFRESH_COOKIE);
    forged.set_value(body.access_token);

    let res = server.get(REFRESH_ROUTE).add_cookie(forged).await;
    res.assert_status(StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Logout
// ---------------------------------------------------------------------------

#[tokio::test]
async fn logout_clears_the_refresh_cookie() {
    let server = test_server();
    login(&server).await;

    let res = server.post("/logout").await;
    res.assert_status_ok();

    let removal = res.cookie(REFRESH_COOKIE);
    assert!(removal.value().is_empty());
    assert_eq!(removal.path(), Some(REFRESH_ROUTE));
}

#[tokio::test]
async fn logout_is_idempotent() {
    let server = test_server();
    // No prior login, no cookie: still succeeds.
    let res = server.post("/logout").await;
    res.assert_status_ok();
}

#[tokio::test]
async fn refresh_after_logout_fails_without_the_cookie() {
    let server = test_server();
    login(&server).await;
    server.post("/logout").await.assert_status_ok();

    // The browser dropped the cookie; a bare refresh is rejected.
    let res = server.get(REFRESH_ROUTE).await;
    res.assert_status(StatusCode::UNAUTHORIZED);
}
