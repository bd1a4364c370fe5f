use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::user::{User, UserRepository};
use crate::errors::domain::DomainError;
use crate::trace_ctx;

/// Use-case layer for users. Each operation is a single repository call
/// whose result is returned unchanged.
#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        let users = self.repo.list().await?;
        debug!(trace_id = %trace_ctx::trace_id(), count = users.len(), "listed users");
        Ok(users)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<User, DomainError> {
        self.repo.get_by_id(id).await
    }

    pub async fn create(&self, user: &User) -> Result<(), DomainError> {
        self.repo.create(user).await?;
        info!(trace_id = %trace_ctx::trace_id(), user_id = %user.id, "user created");
        Ok(())
    }
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService").finish_non_exhaustive()
    }
}
