//! Application settings loaded from environment variables.

use std::env;
use std::ops::RangeInclusive;
use std::str::FromStr;

use url::Url;

use super::constants::{
    DEFAULT_DATABASE_HOST, DEFAULT_DATABASE_MAX_CONNECTIONS, DEFAULT_DATABASE_NAME,
    DEFAULT_DATABASE_PORT, DEFAULT_DATABASE_USER, DEFAULT_JWT_EXPIRATION_MINUTES,
    DEFAULT_PBKDF2_ITERATIONS, DEFAULT_REQUEST_TIMEOUT_SECONDS, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT, MAX_JWT_EXPIRATION_MINUTES, MAX_REQUEST_TIMEOUT_SECONDS,
    MIN_JWT_SECRET_LENGTH,
};
use crate::errors::{AppError, AppResult};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub server_host: String,
    pub server_port: u16,
    pub password_hash_iterations: u32,
    jwt_secret: Option<String>,
    pub jwt_expiration_minutes: i64,
    pub request_timeout_seconds: u64,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("database_max_connections", &self.database_max_connections)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("password_hash_iterations", &self.password_hash_iterations)
            .field(
                "jwt_secret",
                &self.jwt_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field("jwt_expiration_minutes", &self.jwt_expiration_minutes)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables, reading `.env` first
    /// when one is present.
    ///
    /// # Errors
    /// Returns `AppError::Config` when a value is malformed or `JWT_SECRET`
    /// is set but too short.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = match non_empty(&lookup, "DATABASE_URL") {
            Some(url) => url,
            None => assemble_database_url(
                &non_empty(&lookup, "PG_HOST").unwrap_or_else(|| DEFAULT_DATABASE_HOST.to_string()),
                parse_var(&lookup, "PG_PORT", DEFAULT_DATABASE_PORT)?,
                &non_empty(&lookup, "PG_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string()),
                &non_empty(&lookup, "PG_USER").unwrap_or_else(|| DEFAULT_DATABASE_USER.to_string()),
                &lookup("PG_PASSWORD").unwrap_or_default(),
            )?,
        };

        let jwt_secret = non_empty(&lookup, "JWT_SECRET");
        if let Some(secret) = &jwt_secret {
            if secret.len() < MIN_JWT_SECRET_LENGTH {
                return Err(AppError::config(format!(
                    "JWT_SECRET must be at least {} characters long",
                    MIN_JWT_SECRET_LENGTH
                )));
            }
        }

        let password_hash_iterations =
            parse_var(&lookup, "PASSWORD_HASH_ITERATIONS", DEFAULT_PBKDF2_ITERATIONS)?;
        if password_hash_iterations == 0 {
            return Err(AppError::config(
                "PASSWORD_HASH_ITERATIONS must be greater than 0",
            ));
        }

        // SERVER_PORT wins over PORT
        let server_port = match non_empty(&lookup, "SERVER_PORT") {
            Some(_) => parse_var(&lookup, "SERVER_PORT", DEFAULT_SERVER_PORT)?,
            None => parse_var(&lookup, "PORT", DEFAULT_SERVER_PORT)?,
        };

        Ok(Self {
            database_url,
            database_max_connections: parse_var(
                &lookup,
                "DATABASE_MAX_CONNECTIONS",
                DEFAULT_DATABASE_MAX_CONNECTIONS,
            )?,
            server_host: non_empty(&lookup, "SERVER_HOST")
                .unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
            server_port,
            password_hash_iterations,
            jwt_secret,
            jwt_expiration_minutes: parse_bounded(
                &lookup,
                "JWT_EXPIRATION_MINUTES",
                DEFAULT_JWT_EXPIRATION_MINUTES,
                1..=MAX_JWT_EXPIRATION_MINUTES,
            )?,
            request_timeout_seconds: parse_bounded(
                &lookup,
                "REQUEST_TIMEOUT_SECONDS",
                DEFAULT_REQUEST_TIMEOUT_SECONDS,
                1..=MAX_REQUEST_TIMEOUT_SECONDS,
            )?,
        })
    }

    /// JWT secret bytes, present only when token issuance is enabled.
    pub fn jwt_secret_bytes(&self) -> Option<&[u8]> {
        self.jwt_secret.as_deref().map(str::as_bytes)
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|v| !v.trim().is_empty())
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> AppResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match non_empty(lookup, key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::config(format!("{} has an invalid value: {}", key, raw))),
        None => Ok(default),
    }
}

/// Parse `key` and require the value to fall inside `range`.
fn parse_bounded<F, T>(lookup: &F, key: &str, default: T, range: RangeInclusive<T>) -> AppResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + PartialOrd + std::fmt::Display,
{
    let value = parse_var(lookup, key, default)?;
    if !range.contains(&value) {
        return Err(AppError::config(format!(
            "{} must be between {} and {}, got {}",
            key,
            range.start(),
            range.end(),
            value
        )));
    }
    Ok(value)
}

/// Build a postgres URL from its parts, percent-encoding the credentials.
fn assemble_database_url(
    host: &str,
    port: u16,
    name: &str,
    user: &str,
    password: &str,
) -> AppResult<String> {
    let mut url = Url::parse(&format!("postgres://{}", host))
        .map_err(|e| AppError::config(format!("PG_HOST is not a valid host: {}", e)))?;

    url.set_port(Some(port))
        .map_err(|()| AppError::config("Error setting database port"))?;
    url.set_username(user)
        .map_err(|()| AppError::config("Error setting database user"))?;
    if !password.is_empty() {
        url.set_password(Some(password))
            .map_err(|()| AppError::config("Error setting database password"))?;
    }
    url.set_path(name);

    Ok(url.to_string())
}
