//! Authentication service - signup and login use cases.
//!
//! Orchestrates the user repository and the credential manager. Key
//! derivation is CPU-bound, so it always runs on the blocking pool.

use async_trait::async_trait;
use std::sync::Arc;

use super::token::{TokenIssuer, TokenResponse};
use crate::config::Config;
use crate::domain::{CredentialManager, NewUser, Registration, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

/// Salt used to burn the same derivation work when an email is unknown.
const DUMMY_SALT: &str = "0123456789abcdef0123456789abcdef";

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    /// Present only when token issuance is enabled
    pub token: Option<TokenResponse>,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user
    async fn register(&self, registration: Registration) -> AppResult<User>;

    /// Check credentials and return the matching user
    async fn login(&self, email: String, password: String) -> AppResult<LoginOutcome>;
}

/// Concrete implementation of AuthService.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    credentials: CredentialManager,
    tokens: Option<TokenIssuer>,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(users: Arc<dyn UserRepository>, credentials: CredentialManager) -> Self {
        Self {
            users,
            credentials,
            tokens: None,
        }
    }

    /// Enable bearer token issuance on login.
    pub fn with_token_issuer(mut self, issuer: TokenIssuer) -> Self {
        self.tokens = Some(issuer);
        self
    }

    /// Wire the service from configuration.
    pub fn from_config(users: Arc<dyn UserRepository>, config: &Config) -> AppResult<Self> {
        let credentials = CredentialManager::new(config.password_hash_iterations)?;
        let service = Self::new(users, credentials);

        Ok(match TokenIssuer::from_config(config) {
            Some(issuer) => service.with_token_issuer(issuer),
            None => service,
        })
    }
}

/// Run CPU-bound credential work off the async workers.
async fn run_blocking<T, F>(f: F) -> AppResult<T>
where
    F: FnOnce() -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::internal(format!("Credential task failed: {}", e)))?
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(&self, registration: Registration) -> AppResult<User> {
        let Registration {
            username,
            email,
            password,
            user_type,
        } = registration;

        // Fast path only; the unique constraint is what actually holds
        if self.users.exists_by_email(&email).await? {
            return Err(AppError::conflict("Email"));
        }

        let credentials = self.credentials;
        let secret = run_blocking(move || credentials.derive_secret(&password, None)).await?;

        let user = self
            .users
            .create(NewUser::new(username, email, secret, user_type))
            .await?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    async fn login(&self, email: String, password: String) -> AppResult<LoginOutcome> {
        if password.is_empty() {
            return Err(AppError::validation("Password is required"));
        }

        let user = self.users.find_by_email(&email).await?;

        let (salt, stored_secret) = match &user {
            Some(user) => (user.salt.clone(), user.password_hash.clone()),
            None => (DUMMY_SALT.to_string(), String::new()),
        };

        let credentials = self.credentials;
        let matched = run_blocking(move || credentials.verify_secret(&password, &salt, &stored_secret))
            .await
            .map_err(|e| match e {
                // The password was checked above, so this is a bad stored salt
                AppError::Validation(msg) => {
                    AppError::internal(format!("Stored credentials unusable: {}", msg))
                }
                other => other,
            })?;

        let user = match user {
            Some(user) if matched => user,
            _ => {
                tracing::debug!("Login rejected");
                return Err(AppError::InvalidCredentials);
            }
        };

        let token = self
            .tokens
            .as_ref()
            .map(|issuer| issuer.issue(&user))
            .transpose()?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(LoginOutcome { user, token })
    }
}
