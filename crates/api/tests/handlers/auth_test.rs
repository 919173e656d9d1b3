use axum::http::{header, HeaderValue, StatusCode};
use axum_test::TestResponse;
use coachbook_api::middleware::auth::{issue_token, TokenKind};
use coachbook_core::models::admin::LoginResponse;
use mockall::predicate;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{admin, admin_auth, auth_settings, ADMIN_EMAIL, ADMIN_PASSWORD, TestContext};

fn set_cookies(response: &TestResponse) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}

fn cookie_header(name: &str, value: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("{name}={value}")).unwrap()
}

#[tokio::test]
async fn test_login_sets_session_cookies() {
    let mut ctx = TestContext::new();
    let account = admin();
    let id = account.id;
    ctx.store
        .expect_get_admin_by_email()
        .times(1)
        .returning(move |_| Ok(Some(account.clone())));
    let (server, _) = ctx.server();

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": " Admin@Example.com ", "password": ADMIN_PASSWORD }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<LoginResponse>();
    assert!(body.success);
    assert_eq!(body.admin.id, id);
    assert_eq!(body.admin.email, ADMIN_EMAIL);

    let cookies = set_cookies(&response);
    let access = cookies.iter().find(|c| c.starts_with("token=")).unwrap();
    let refresh = cookies.iter().find(|c| c.starts_with("refreshToken=")).unwrap();
    assert!(access.contains("HttpOnly"));
    assert!(access.contains("Path=/api"));
    assert!(refresh.contains("Path=/api/auth"));
    assert!(refresh.contains("SameSite=Strict"));
}

#[tokio::test]
async fn test_login_wrong_password() {
    let mut ctx = TestContext::new();
    let account = admin();
    ctx.store
        .expect_get_admin_by_email()
        .returning(move |_| Ok(Some(account.clone())));
    let (server, _) = ctx.server();

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": ADMIN_EMAIL, "password": "wrong-password" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert!(set_cookies(&response).is_empty());
}

#[tokio::test]
async fn test_login_unknown_email_looks_like_wrong_password() {
    let mut ctx = TestContext::new();
    ctx.store.expect_get_admin_by_email().returning(|_| Ok(None));
    let (server, _) = ctx.server();

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": "nobody@example.com", "password": ADMIN_PASSWORD }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.json::<Value>()["error"],
        "Authentication error: Invalid email or password"
    );
}

#[tokio::test]
async fn test_refresh_issues_new_access_cookie() {
    let mut ctx = TestContext::new();
    let account = admin();
    let id = account.id;
    ctx.store
        .expect_get_admin()
        .with(predicate::eq(id))
        .returning(move |_| Ok(Some(account.clone())));
    let (server, _) = ctx.server();
    let refresh = issue_token(&auth_settings(), TokenKind::Refresh, id, ADMIN_EMAIL).unwrap();

    let response = server
        .post("/api/auth/refresh")
        .add_header(header::COOKIE, cookie_header("refreshToken", &refresh))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(set_cookies(&response).iter().any(|c| c.starts_with("token=")));
}

#[tokio::test]
async fn test_refresh_requires_refresh_cookie() {
    let (server, _) = TestContext::new().server();

    let response = server.post("/api/auth/refresh").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    // An access token is not accepted in place of a refresh token
    let access = issue_token(&auth_settings(), TokenKind::Access, Uuid::new_v4(), ADMIN_EMAIL).unwrap();
    let response = server
        .post("/api/auth/refresh")
        .add_header(header::COOKIE, cookie_header("refreshToken", &access))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_clears_cookies() {
    let (server, _) = TestContext::new().server();

    let response = server
        .post("/api/auth/logout")
        .add_header(
            header::COOKIE,
            HeaderValue::from_static("token=access-value; refreshToken=refresh-value"),
        )
        .await;

    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
    let cookies = set_cookies(&response);
    assert!(cookies.iter().any(|c| c.starts_with("token=")));
    assert!(cookies.iter().any(|c| c.starts_with("refreshToken=")));
}

#[tokio::test]
async fn test_access_cookie_opens_admin_routes() {
    let mut ctx = TestContext::new();
    ctx.store.expect_count_packages().returning(|| Ok(4));
    ctx.store
        .expect_booking_status_counts()
        .returning(|| Ok(vec![]));
    let (server, _) = ctx.server();
    let access = issue_token(&auth_settings(), TokenKind::Access, Uuid::new_v4(), ADMIN_EMAIL).unwrap();

    let response = server
        .get("/api/admin/stats")
        .add_header(header::COOKIE, cookie_header("token", &access))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["total_packages"], 4);
}

#[tokio::test]
async fn test_refresh_token_does_not_open_admin_routes() {
    let (server, _) = TestContext::new().server();
    let refresh = issue_token(&auth_settings(), TokenKind::Refresh, Uuid::new_v4(), ADMIN_EMAIL).unwrap();

    let response = server
        .get("/api/admin/stats")
        .add_header(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {refresh}")).unwrap(),
        )
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_change_password() {
    let mut ctx = TestContext::new();
    let account = admin();
    let id = account.id;
    ctx.store
        .expect_get_admin()
        .with(predicate::eq(id))
        .returning(move |_| Ok(Some(account.clone())));
    ctx.store
        .expect_update_admin_password()
        .withf(move |aid, hash| *aid == id && hash.starts_with("$argon2"))
        .times(1)
        .returning(|_, _| Ok(true));
    let (server, _) = ctx.server();
    let (name, value) = admin_auth(id);

    let response = server
        .post("/api/admin/password")
        .add_header(name, value)
        .json(&json!({ "current_password": ADMIN_PASSWORD, "new_password": "a-longer-secret" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["success"], true);
}

#[tokio::test]
async fn test_change_password_checks_current_password() {
    let mut ctx = TestContext::new();
    let account = admin();
    let id = account.id;
    ctx.store
        .expect_get_admin()
        .returning(move |_| Ok(Some(account.clone())));
    let (server, _) = ctx.server();
    let (name, value) = admin_auth(id);

    let response = server
        .post("/api/admin/password")
        .add_header(name, value)
        .json(&json!({ "current_password": "not-my-password", "new_password": "a-longer-secret" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_change_password_rules() {
    let (server, _) = TestContext::new().server();
    let (name, value) = admin_auth(Uuid::new_v4());

    for payload in [
        json!({ "current_password": ADMIN_PASSWORD, "new_password": "short" }),
        json!({ "current_password": ADMIN_PASSWORD, "new_password": ADMIN_PASSWORD }),
    ] {
        let response = server
            .post("/api/admin/password")
            .add_header(name.clone(), value.clone())
            .json(&payload)
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{payload}");
    }
}
