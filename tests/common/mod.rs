//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use sea_orm::DbErr;
use serde_json::Value;
use tokio::sync::Mutex;
use tower::ServiceExt;
use uuid::Uuid;

use auth_api::api::{create_router, AppState};
use auth_api::domain::{CredentialManager, NewUser, User};
use auth_api::errors::{AppError, AppResult};
use auth_api::infra::UserRepository;
use auth_api::services::{Authenticator, TokenIssuer};

/// Cheap iteration count so tests stay fast
pub const TEST_ITERATIONS: u32 = 1_000;

pub const TEST_JWT_SECRET: &[u8] = b"integration-test-secret-at-least-32-bytes";

/// In-memory user store keyed by email.
#[derive(Default)]
pub struct InMemoryUsers {
    rows: Mutex<HashMap<String, User>>,
    failing: AtomicBool,
    /// Hide existing rows from the pre-check so inserts hit the constraint
    racing: AtomicBool,
}

impl InMemoryUsers {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail_storage(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn simulate_race(&self, racing: bool) {
        self.racing.store(racing, Ordering::SeqCst);
    }

    pub async fn get(&self, email: &str) -> Option<User> {
        self.rows.lock().await.get(email).cloned()
    }

    pub async fn len(&self) -> usize {
        self.rows.lock().await.len()
    }

    fn check_storage(&self) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::Database(DbErr::Custom(
                "connection refused".to_string(),
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.check_storage()?;
        Ok(self.rows.lock().await.get(email).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        self.check_storage()?;
        if self.racing.load(Ordering::SeqCst) {
            return Ok(false);
        }
        Ok(self.rows.lock().await.contains_key(email))
    }

    async fn create(&self, user: NewUser) -> AppResult<User> {
        self.check_storage()?;
        let mut rows = self.rows.lock().await;
        if rows.contains_key(&user.email) {
            return Err(AppError::conflict("Email"));
        }

        let user = user.into_user(Uuid::new_v4(), Utc::now());
        rows.insert(user.email.clone(), user.clone());
        Ok(user)
    }
}

pub fn authenticator(users: Arc<InMemoryUsers>) -> Authenticator {
    let credentials = CredentialManager::new(TEST_ITERATIONS).expect("valid iterations");
    Authenticator::new(users, credentials)
}

/// Router backed by the in-memory store, without token issuance.
pub fn test_app(users: Arc<InMemoryUsers>) -> Router {
    create_router(AppState::new(Arc::new(authenticator(users))))
}

/// Router backed by the in-memory store, issuing tokens on login.
pub fn test_app_with_tokens(users: Arc<InMemoryUsers>) -> Router {
    let service = authenticator(users).with_token_issuer(TokenIssuer::new(TEST_JWT_SECRET, 60));
    create_router(AppState::new(Arc::new(service)))
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");

    send(app, request).await
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("request");

    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("infallible router");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub fn alice() -> Value {
    serde_json::json!({
        "username": "alice",
        "email": "alice@example.com",
        "password": "wonderland",
        "userType": "student"
    })
}
