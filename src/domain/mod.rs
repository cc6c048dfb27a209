//! Domain layer - Core business entities and logic
//!
//! Contains the credential manager and the user entity. Nothing here talks
//! to storage or the network.

pub mod password;
pub mod user;

pub use password::{generate_salt, CredentialManager, DerivedSecret};
pub use user::{NewUser, Registration, User};
