//! Bearer token issuance.
//!
//! Tokens are opaque to clients; this service only signs them. Nothing in
//! the API consumes them.

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{Config, SECONDS_PER_MINUTE, TOKEN_TYPE_BEARER};
use crate::domain::User;
use crate::errors::{AppError, AppResult};

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub user_type: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token returned after successful authentication
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token lifetime in seconds
    #[schema(example = 3600)]
    pub expires_in: i64,
}

/// Signs HS256 bearer tokens for logged-in users.
#[derive(Clone)]
pub struct TokenIssuer {
    key: EncodingKey,
    expiration_minutes: i64,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("key", &"[REDACTED]")
            .field("expiration_minutes", &self.expiration_minutes)
            .finish()
    }
}

impl TokenIssuer {
    pub fn new(secret: &[u8], expiration_minutes: i64) -> Self {
        Self {
            key: EncodingKey::from_secret(secret),
            expiration_minutes,
        }
    }

    /// Build an issuer when `JWT_SECRET` is configured.
    pub fn from_config(config: &Config) -> Option<Self> {
        config
            .jwt_secret_bytes()
            .map(|secret| Self::new(secret, config.jwt_expiration_minutes))
    }

    /// Sign a token for `user`.
    pub fn issue(&self, user: &User) -> AppResult<TokenResponse> {
        let now = Utc::now();
        let expires_at = Duration::try_minutes(self.expiration_minutes)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| self.lifetime_error())?;
        let expires_in = self
            .expiration_minutes
            .checked_mul(SECONDS_PER_MINUTE)
            .ok_or_else(|| self.lifetime_error())?;

        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            user_type: user.user_type.clone(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.key)?;

        Ok(TokenResponse {
            access_token: token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in,
        })
    }

    fn lifetime_error(&self) -> AppError {
        AppError::internal(format!(
            "Token lifetime of {} minutes is out of range",
            self.expiration_minutes
        ))
    }
}
