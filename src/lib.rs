//! Auth API - user signup and login over HTTP
//!
//! Accounts are stored in PostgreSQL with a PBKDF2-HMAC-SHA512 derived
//! secret and a per-user random salt. The plaintext password never leaves
//! the request that carried it.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Credential derivation and user records
//! - **services**: Registration and login use cases
//! - **infra**: Database pool, migrations and repositories
//! - **api**: HTTP handlers, extractors and routes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{CredentialManager, User};
pub use errors::{AppError, AppResult};
