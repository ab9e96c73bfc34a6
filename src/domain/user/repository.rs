//! User repository trait

use std::fmt::Debug;

use async_trait::async_trait;

use super::{User, UserId};
use crate::domain::DomainError;

/// Persistence operations on user accounts
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Get a user by ID
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Get a user by email
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Check whether an email is already registered
    async fn email_exists(&self, email: &str) -> Result<bool, DomainError>;

    /// Create a new user; fails with Conflict when the email is taken
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Count registered users
    async fn count(&self) -> Result<usize, DomainError>;
}
