//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence so the
//! services never see a connection pool directly.

pub(crate) mod entities;
mod user_repository;

pub use user_repository::{UserRepository, UserStore};

// Export mock for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
