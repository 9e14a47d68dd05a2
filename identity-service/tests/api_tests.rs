mod common;

use auth::IdentityClaims;
use auth::Role;
use axum::http::Method;
use axum::http::StatusCode;
use chrono::Duration;
use chrono::Utc;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_signup_success() {
    let app = TestApp::spawn();

    let response = app
        .post(
            "/auth/signup",
            json!({
                "email": "kim@example.com",
                "password": "Valid1Password"
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);

    let bearer = response.body["data"]["bearerToken"]
        .as_str()
        .expect("bearerToken missing");
    let token = bearer.strip_prefix("Bearer ").expect("Bearer prefix missing");

    let claims = app.token_service.verify(token).expect("Token should verify");
    assert_eq!(claims.email, "kim@example.com");
    assert_eq!(claims.role, Role::User);
    assert_eq!(app.repository.create_count(), 1);
}

#[tokio::test]
async fn test_signup_with_admin_role() {
    let app = TestApp::spawn();

    let response = app
        .post(
            "/auth/signup",
            json!({
                "email": "root@example.com",
                "password": "Valid1Password",
                "role": "admin"
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let stored = app.repository.get(1).expect("User should be stored");
    assert_eq!(stored.role, Role::Admin);
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    let app = TestApp::spawn();
    app.seed_user("kim@example.com", "Valid1Password", Role::User);

    let response = app
        .post(
            "/auth/signup",
            json!({
                "email": "kim@example.com",
                "password": "Another1Password"
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["data"]["message"], "이미 존재하는 이메일입니다.");
    assert_eq!(app.repository.create_count(), 0);
}

#[tokio::test]
async fn test_signup_missing_email() {
    let app = TestApp::spawn();

    let response = app
        .post("/auth/signup", json!({ "password": "Valid1Password" }))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["data"]["message"], "이메일이 필요합니다.");
    assert_eq!(app.repository.create_count(), 0);
}

#[tokio::test]
async fn test_signup_missing_password() {
    let app = TestApp::spawn();

    let response = app
        .post("/auth/signup", json!({ "email": "kim@example.com" }))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["data"]["message"], "비밀번호가 필요합니다.");
}

#[tokio::test]
async fn test_signin_success() {
    let app = TestApp::spawn();
    let user = app.seed_user("kim@example.com", "Valid1Password", Role::User);

    let response = app
        .post(
            "/auth/signin",
            json!({
                "email": "kim@example.com",
                "password": "Valid1Password"
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);

    let bearer = response.body["data"]["bearerToken"].as_str().unwrap();
    let claims = app
        .token_service
        .verify(bearer.strip_prefix("Bearer ").unwrap())
        .unwrap();
    assert_eq!(claims.user_id, user.id.0);
}

#[tokio::test]
async fn test_signin_wrong_password() {
    let app = TestApp::spawn();
    app.seed_user("kim@example.com", "Valid1Password", Role::User);

    let response = app
        .post(
            "/auth/signin",
            json!({
                "email": "kim@example.com",
                "password": "Wrong1Password"
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["data"]["message"], "잘못된 비밀번호입니다.");
}

#[tokio::test]
async fn test_signin_unknown_email() {
    let app = TestApp::spawn();

    let response = app
        .post(
            "/auth/signin",
            json!({
                "email": "ghost@example.com",
                "password": "Valid1Password"
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["data"]["message"], "가입되지 않은 유저입니다.");
}

#[tokio::test]
async fn test_get_user() {
    let app = TestApp::spawn();
    let user = app.seed_user("kim@example.com", "Valid1Password", Role::User);
    let token = app.token_for(&user);

    let response = app
        .request(Method::GET, "/users/1", Some(&token), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["id"], 1);
    assert_eq!(response.body["data"]["email"], "kim@example.com");
}

#[tokio::test]
async fn test_get_user_not_found() {
    let app = TestApp::spawn();
    let user = app.seed_user("kim@example.com", "Valid1Password", Role::User);
    let token = app.token_for(&user);

    let response = app
        .request(Method::GET, "/users/42", Some(&token), None)
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_user_invalid_id() {
    let app = TestApp::spawn();
    let user = app.seed_user("kim@example.com", "Valid1Password", Role::User);
    let token = app.token_for(&user);

    let response = app
        .request(Method::GET, "/users/abc", Some(&token), None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["data"]["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid user ID"));
}

#[tokio::test]
async fn test_protected_route_without_token() {
    let app = TestApp::spawn();
    app.seed_user("kim@example.com", "Valid1Password", Role::User);

    let response = app.request(Method::GET, "/users/1", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.body["data"]["message"],
        "Missing Authorization header"
    );
}

#[tokio::test]
async fn test_protected_route_with_garbage_token() {
    let app = TestApp::spawn();

    let response = app
        .request(Method::GET, "/users/1", Some("not.a.jwt"), None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["data"]["message"], "Invalid token");
}

#[tokio::test]
async fn test_protected_route_with_expired_token() {
    let app = TestApp::spawn();
    let user = app.seed_user("kim@example.com", "Valid1Password", Role::User);

    let now = Utc::now().timestamp();
    let claims = IdentityClaims::for_user(
        user.id.0,
        "kim@example.com",
        Role::User,
        Duration::minutes(60),
    )
    .with_window(now - 7200, now - 3600);
    let token = app.token_service.sign(&claims).unwrap();

    let response = app
        .request(Method::GET, "/users/1", Some(&token), None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.body["data"]["message"],
        "Token expired, please log in again"
    );
}

#[tokio::test]
async fn test_change_password() {
    let app = TestApp::spawn();
    let user = app.seed_user("kim@example.com", "Valid1Password", Role::User);
    let token = app.token_for(&user);

    let response = app
        .request(
            Method::PUT,
            "/users",
            Some(&token),
            Some(json!({
                "oldPassword": "Valid1Password",
                "newPassword": "Fresh2Password"
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);

    // Old password no longer signs in, new one does
    let old = app
        .post(
            "/auth/signin",
            json!({ "email": "kim@example.com", "password": "Valid1Password" }),
        )
        .await;
    assert_eq!(old.status, StatusCode::UNAUTHORIZED);

    let new = app
        .post(
            "/auth/signin",
            json!({ "email": "kim@example.com", "password": "Fresh2Password" }),
        )
        .await;
    assert_eq!(new.status, StatusCode::OK);
}

#[tokio::test]
async fn test_change_password_rejects_weak_password() {
    let app = TestApp::spawn();
    let user = app.seed_user("kim@example.com", "Valid1Password", Role::User);
    let token = app.token_for(&user);

    let response = app
        .request(
            Method::PUT,
            "/users",
            Some(&token),
            Some(json!({
                "oldPassword": "Valid1Password",
                "newPassword": "weak"
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["data"]["message"],
        "새 비밀번호는 8자 이상이어야 하고, 숫자와 대문자를 포함해야 합니다."
    );
    assert_eq!(app.repository.update_count(), 0);
}

#[tokio::test]
async fn test_admin_changes_role_and_is_audited() {
    let app = TestApp::spawn();
    let admin = app.seed_user("admin@example.com", "Valid1Password", Role::Admin);
    let target = app.seed_user("kim@example.com", "Valid1Password", Role::User);
    let token = app.token_for(&admin);

    let path = format!("/admin/users/{}", target.id.0);
    let response = app
        .request(
            Method::PATCH,
            &path,
            Some(&token),
            Some(json!({ "role": "ADMIN" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["role"], "ADMIN");
    assert_eq!(app.repository.get(target.id.0).unwrap().role, Role::Admin);
    assert_eq!(app.repository.update_count(), 1);

    let entries = app.access_log.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].user_id, Some(admin.id));
    assert_eq!(entries[0].path, path);
    assert!(entries[0].duration >= std::time::Duration::ZERO);
}

#[tokio::test]
async fn test_user_role_is_forbidden_from_admin_route() {
    let app = TestApp::spawn();
    let caller = app.seed_user("kim@example.com", "Valid1Password", Role::User);
    let target = app.seed_user("lee@example.com", "Valid1Password", Role::User);
    let token = app.token_for(&caller);

    let response = app
        .request(
            Method::PATCH,
            &format!("/admin/users/{}", target.id.0),
            Some(&token),
            Some(json!({ "role": "ADMIN" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(app.repository.update_count(), 0);
    assert_eq!(app.repository.get(target.id.0).unwrap().role, Role::User);
    assert!(app.access_log.entries().is_empty());
}

#[tokio::test]
async fn test_admin_route_without_token_is_unauthorized() {
    let app = TestApp::spawn();
    app.seed_user("kim@example.com", "Valid1Password", Role::User);

    let response = app
        .request(
            Method::PATCH,
            "/admin/users/1",
            None,
            Some(json!({ "role": "ADMIN" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.repository.update_count(), 0);
    assert!(app.access_log.entries().is_empty());
}

#[tokio::test]
async fn test_failed_admin_call_is_still_audited() {
    let app = TestApp::spawn();
    let admin = app.seed_user("admin@example.com", "Valid1Password", Role::Admin);
    let token = app.token_for(&admin);

    let response = app
        .request(
            Method::PATCH,
            "/admin/users/99",
            Some(&token),
            Some(json!({ "role": "ADMIN" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(app.access_log.entries().len(), 1);
}

#[tokio::test]
async fn test_admin_invalid_role_label() {
    let app = TestApp::spawn();
    let admin = app.seed_user("admin@example.com", "Valid1Password", Role::Admin);
    let token = app.token_for(&admin);

    let response = app
        .request(
            Method::PATCH,
            "/admin/users/1",
            Some(&token),
            Some(json!({ "role": "SUPERUSER" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["data"]["message"], "유효하지 않은 UserRole");
    assert_eq!(app.repository.update_count(), 0);
}

#[tokio::test]
async fn test_full_user_workflow() {
    let app = TestApp::spawn();

    let signup = app
        .post(
            "/auth/signup",
            json!({ "email": "kim@example.com", "password": "Valid1Password" }),
        )
        .await;
    assert_eq!(signup.status, StatusCode::OK);
    let bearer = signup.body["data"]["bearerToken"].as_str().unwrap();
    let token = bearer.strip_prefix("Bearer ").unwrap().to_string();

    let fetched = app
        .request(Method::GET, "/users/1", Some(&token), None)
        .await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["data"]["email"], "kim@example.com");

    // Self-registered users cannot promote themselves
    let promote = app
        .request(
            Method::PATCH,
            "/admin/users/1",
            Some(&token),
            Some(json!({ "role": "ADMIN" })),
        )
        .await;
    assert_eq!(promote.status, StatusCode::FORBIDDEN);
}
