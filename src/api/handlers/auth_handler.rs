//! Signup and login handlers.

use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::config::{MSG_LOGIN_SUCCESS, MSG_SIGNUP_SUCCESS};
use crate::domain::Registration;
use crate::errors::AppResult;
use crate::services::TokenResponse;

/// Signup request
#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    /// Display name
    #[validate(custom(function = "not_blank", message = "Username is required"))]
    #[schema(example = "alice")]
    pub username: String,
    /// Email address, unique per user
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "alice@example.com")]
    pub email: String,
    /// Plaintext password
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "correct horse battery staple")]
    pub password: String,
    /// Classification label
    #[validate(custom(function = "not_blank", message = "User type is required"))]
    #[schema(example = "student")]
    pub user_type: String,
}

/// Login request
#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Email address
    #[validate(length(min = 1, message = "Email is required"))]
    #[schema(example = "alice@example.com")]
    pub email: String,
    /// Plaintext password
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "correct horse battery staple")]
    pub password: String,
}

/// Signup response
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    #[schema(example = "User registered successfully")]
    pub message: String,
    pub user_id: Uuid,
}

/// Login response
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[schema(example = "Login successful")]
    pub message: String,
    pub user_id: Uuid,
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "student")]
    pub user_type: String,
    /// Only present when token issuance is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<TokenResponse>,
}

/// Reject empty and whitespace-only labels. Passwords are exempt.
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/signup",
    tag = "Authentication",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User registered", body = SignupResponse),
        (status = 400, description = "Missing or invalid field, or email already registered"),
        (status = 500, description = "Server error")
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignupRequest>,
) -> AppResult<(StatusCode, Json<SignupResponse>)> {
    let user = state
        .auth_service
        .register(Registration {
            username: payload.username,
            email: payload.email,
            password: payload.password,
            user_type: payload.user_type,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: MSG_SIGNUP_SUCCESS.to_string(),
            user_id: user.id,
        }),
    ))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/api/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing field"),
        (status = 401, description = "Invalid email or password"),
        (status = 500, description = "Server error")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let outcome = state
        .auth_service
        .login(payload.email, payload.password)
        .await?;

    Ok(Json(LoginResponse {
        message: MSG_LOGIN_SUCCESS.to_string(),
        user_id: outcome.user.id,
        username: outcome.user.username,
        user_type: outcome.user.user_type,
        token: outcome.token,
    }))
}
