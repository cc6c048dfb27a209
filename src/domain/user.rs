//! User domain entity and related types.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::password::DerivedSecret;

/// User domain entity
#[derive(Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub salt: String,
    /// Free-text classification label, stored but never enforced
    pub user_type: String,
    pub created_at: DateTime<Utc>,
}

// Don't expose credential material in debug output
impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("salt", &"[REDACTED]")
            .field("user_type", &self.user_type)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Row data for a user about to be inserted.
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub salt: String,
    pub user_type: String,
}

impl NewUser {
    pub fn new(username: String, email: String, secret: DerivedSecret, user_type: String) -> Self {
        Self {
            username,
            email,
            password_hash: secret.secret,
            salt: secret.salt,
            user_type,
        }
    }

    /// Materialize the stored row with a generated id.
    pub fn into_user(self, id: Uuid, created_at: DateTime<Utc>) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            salt: self.salt,
            user_type: self.user_type,
            created_at,
        }
    }
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("salt", &"[REDACTED]")
            .field("user_type", &self.user_type)
            .finish()
    }
}

/// Signup input after request validation.
#[derive(Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub user_type: String,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("user_type", &self.user_type)
            .finish()
    }
}
