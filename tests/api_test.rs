//! Integration tests for the HTTP surface.
//!
//! The router runs against an in-memory user store, so no database is
//! needed.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{alice, get, post_json, test_app, test_app_with_tokens, InMemoryUsers};

// =============================================================================
// Signup
// =============================================================================

#[tokio::test]
async fn test_signup_creates_user() {
    let users = InMemoryUsers::new();

    let (status, body) = post_json(test_app(users.clone()), "/api/signup", alice()).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User registered successfully");

    let stored = users.get("alice@example.com").await.expect("row stored");
    assert_eq!(body["userId"], stored.id.to_string());
    assert_eq!(stored.username, "alice");
    assert_eq!(stored.user_type, "student");
    assert_ne!(stored.password_hash, "wonderland");
    assert_eq!(stored.password_hash.len(), 128);
    assert_eq!(stored.salt.len(), 32);
}

#[tokio::test]
async fn test_signup_missing_field_is_rejected() {
    let users = InMemoryUsers::new();
    let payload = json!({
        "username": "alice",
        "email": "alice@example.com",
        "userType": "student"
    });

    let (status, body) = post_json(test_app(users.clone()), "/api/signup", payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(users.len().await, 0);
}

#[tokio::test]
async fn test_signup_empty_field_is_rejected() {
    let users = InMemoryUsers::new();
    let mut payload = alice();
    payload["username"] = json!("");

    let (status, body) = post_json(test_app(users.clone()), "/api/signup", payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap_or_default().contains("Username is required"));
    assert_eq!(users.len().await, 0);
}

#[tokio::test]
async fn test_signup_blank_labels_are_rejected() {
    let users = InMemoryUsers::new();
    let mut payload = alice();
    payload["username"] = json!("   ");
    payload["userType"] = json!(" ");

    let (status, body) = post_json(test_app(users.clone()), "/api/signup", payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User type is required, Username is required");
    assert_eq!(users.len().await, 0);
}

#[tokio::test]
async fn test_signup_malformed_email_is_rejected() {
    let users = InMemoryUsers::new();
    let mut payload = alice();
    payload["email"] = json!("not-an-email");

    let (status, body) = post_json(test_app(users.clone()), "/api/signup", payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid email format");
    assert_eq!(users.len().await, 0);
}

#[tokio::test]
async fn test_signup_invalid_json_is_rejected() {
    let (status, body) = post_json(
        test_app(InMemoryUsers::new()),
        "/api/signup",
        json!(["not", "an", "object"]),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_signup_duplicate_email_leaves_original() {
    let users = InMemoryUsers::new();
    post_json(test_app(users.clone()), "/api/signup", alice()).await;
    let original = users.get("alice@example.com").await.expect("row stored");

    let mut second = alice();
    second["username"] = json!("mallory");
    second["password"] = json!("other-password");
    let (status, body) = post_json(test_app(users.clone()), "/api/signup", second).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email already exists");
    assert_eq!(body["code"], "CONFLICT");

    let current = users.get("alice@example.com").await.expect("row kept");
    assert_eq!(users.len().await, 1);
    assert_eq!(current.id, original.id);
    assert_eq!(current.username, "alice");
    assert_eq!(current.password_hash, original.password_hash);
}

#[tokio::test]
async fn test_signup_constraint_race_reports_conflict() {
    let users = InMemoryUsers::new();
    post_json(test_app(users.clone()), "/api/signup", alice()).await;
    users.simulate_race(true);

    let (status, body) = post_json(test_app(users.clone()), "/api/signup", alice()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email already exists");
    assert_eq!(users.len().await, 1);
}

#[tokio::test]
async fn test_signup_storage_failure_is_generic() {
    let users = InMemoryUsers::new();
    users.fail_storage(true);

    let (status, body) = post_json(test_app(users), "/api/signup", alice()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Server error");
    assert!(!body.to_string().contains("connection refused"));
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn test_login_success() {
    let users = InMemoryUsers::new();
    let (_, signup) = post_json(test_app(users.clone()), "/api/signup", alice()).await;

    let (status, body) = post_json(
        test_app(users),
        "/api/login",
        json!({"email": "alice@example.com", "password": "wonderland"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["userId"], signup["userId"]);
    assert_eq!(body["username"], "alice");
    assert_eq!(body["userType"], "student");
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn test_login_wrong_password_and_unknown_email_look_alike() {
    let users = InMemoryUsers::new();
    post_json(test_app(users.clone()), "/api/signup", alice()).await;

    let (wrong_status, wrong_body) = post_json(
        test_app(users.clone()),
        "/api/login",
        json!({"email": "alice@example.com", "password": "not-it"}),
    )
    .await;
    let (unknown_status, unknown_body) = post_json(
        test_app(users),
        "/api/login",
        json!({"email": "nobody@example.com", "password": "wonderland"}),
    )
    .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body, unknown_body);
    assert_eq!(wrong_body["message"], "Invalid email or password");
}

#[tokio::test]
async fn test_login_email_is_case_sensitive() {
    let users = InMemoryUsers::new();
    post_json(test_app(users.clone()), "/api/signup", alice()).await;

    let (status, _) = post_json(
        test_app(users),
        "/api/login",
        json!({"email": "Alice@Example.com", "password": "wonderland"}),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_missing_password_is_rejected() {
    let (status, body) = post_json(
        test_app(InMemoryUsers::new()),
        "/api/login",
        json!({"email": "alice@example.com"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_login_storage_failure_is_generic() {
    let users = InMemoryUsers::new();
    users.fail_storage(true);

    let (status, body) = post_json(
        test_app(users),
        "/api/login",
        json!({"email": "alice@example.com", "password": "wonderland"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Server error");
}

#[tokio::test]
async fn test_login_issues_token_when_enabled() {
    let users = InMemoryUsers::new();
    post_json(test_app(users.clone()), "/api/signup", alice()).await;

    let (status, body) = post_json(
        test_app_with_tokens(users),
        "/api/login",
        json!({"email": "alice@example.com", "password": "wonderland"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token"]["tokenType"], "Bearer");
    assert_eq!(body["token"]["expiresIn"], 3600);
    assert!(!body["token"]["accessToken"].as_str().unwrap_or_default().is_empty());
}

// =============================================================================
// Misc routes
// =============================================================================

#[tokio::test]
async fn test_health_without_database() {
    let (status, body) = get(test_app(InMemoryUsers::new()), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "not configured");
}

#[tokio::test]
async fn test_openapi_document_lists_auth_paths() {
    let (status, body) = get(test_app(InMemoryUsers::new()), "/api-docs/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"].get("/api/signup").is_some());
    assert!(body["paths"].get("/api/login").is_some());
}
