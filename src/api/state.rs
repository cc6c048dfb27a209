//! Application state - Dependency injection container.
//!
//! The storage handle reaches handlers only through the injected service,
//! so tests can swap in any `UserRepository`.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{Config, DEFAULT_REQUEST_TIMEOUT_SECONDS};
use crate::errors::AppResult;
use crate::infra::{Database, UserStore};
use crate::services::{AuthService, Authenticator};

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// Database handle for health checks; absent when the service is
    /// backed by something other than the SQL store
    pub database: Option<Arc<Database>>,
    /// Overall per-request deadline
    pub request_timeout: Duration,
}

impl AppState {
    /// Create application state backed by the SQL user store.
    pub fn from_config(database: Arc<Database>, config: &Config) -> AppResult<Self> {
        let users = Arc::new(UserStore::new(database.get_connection()));
        let auth_service = Arc::new(Authenticator::from_config(users, config)?);

        Ok(Self {
            auth_service,
            database: Some(database),
            request_timeout: Duration::from_secs(config.request_timeout_seconds),
        })
    }

    /// Create application state with a manually injected service.
    pub fn new(auth_service: Arc<dyn AuthService>) -> Self {
        Self {
            auth_service,
            database: None,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECONDS),
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
