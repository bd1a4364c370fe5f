//! The `User` entity and the persistence capability the service needs.

use async_trait::async_trait;

use crate::errors::domain::DomainError;

/// Entity name used in not-found errors.
pub const USER_ENTITY: &str = "User";

/// A user record. Identity is `id`, chosen by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Rejects blank identity or name with a validation error.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.trim().is_empty() {
            return Err(DomainError::validation("id", "must not be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name", "must not be empty"));
        }
        Ok(())
    }
}

/// Persistence operations for users.
///
/// Implementations report a missing row as `DomainError::NotFound` and a
/// uniqueness violation on create as `DomainError::Duplicated`; everything
/// else surfaces as one of the persistence kinds.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    async fn get_by_id(&self, id: &str) -> Result<User, DomainError>;

    async fn create(&self, user: &User) -> Result<(), DomainError>;
}
