use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::adapters::users_sea::UserRepoSea;
use crate::domain::user::UserRepository;
use crate::services::users::UserService;

/// Shared state handed to every handler through `web::Data`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub users: UserService,
}

impl AppState {
    pub fn new(users: UserService) -> Self {
        Self { users }
    }

    /// Wire the SeaORM repository over `db`. `dsn` must already be redacted.
    pub fn from_db(db: DatabaseConnection, dsn: impl Into<String>) -> Self {
        let repo = UserRepoSea::new(db).with_dsn(dsn);
        Self::with_repo(Arc::new(repo))
    }

    pub fn with_repo(repo: Arc<dyn UserRepository>) -> Self {
        Self::new(UserService::new(repo))
    }
}
