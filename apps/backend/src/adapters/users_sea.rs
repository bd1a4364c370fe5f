//! SeaORM adapter for the user repository.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, Set};
use tracing::debug;

use crate::domain::user::{User, UserRepository, USER_ENTITY};
use crate::entities::users;
use crate::errors::domain::DomainError;
use crate::infra::db_errors::{is_unique_violation, map_db_err, DbCall};

const TABLE: &str = "users";
const LIST_SQL: &str = "SELECT id, name FROM users";
const GET_SQL: &str = "SELECT id, name FROM users WHERE id = ?";
const INSERT_SQL: &str = "INSERT INTO users (id, name) VALUES (?, ?)";

/// SeaORM implementation of [`UserRepository`].
#[derive(Debug)]
pub struct UserRepoSea {
    db: DatabaseConnection,
    dsn: String,
}

impl UserRepoSea {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            dsn: "unknown".to_string(),
        }
    }

    /// Connection target reported in connection errors. Pass the redacted
    /// URL, never the raw one.
    pub fn with_dsn(mut self, dsn: impl Into<String>) -> Self {
        self.dsn = dsn.into();
        self
    }

    fn call<'a>(&'a self, operation: &'a str, query: &'a str) -> DbCall<'a> {
        DbCall {
            operation,
            table: TABLE,
            query,
            dsn: &self.dsn,
        }
    }
}

impl From<users::Model> for User {
    fn from(row: users::Model) -> Self {
        User::new(row.id, row.name)
    }
}

#[async_trait]
impl UserRepository for UserRepoSea {
    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let rows = users::Entity::find()
            .order_by_asc(users::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| map_db_err(e, self.call("select", LIST_SQL)))?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn get_by_id(&self, id: &str) -> Result<User, DomainError> {
        let row = users::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| map_db_err(e, self.call("select", GET_SQL)))?;

        row.map(User::from)
            .ok_or_else(|| DomainError::not_found(USER_ENTITY, id))
    }

    async fn create(&self, user: &User) -> Result<(), DomainError> {
        let model = users::ActiveModel {
            id: Set(user.id.clone()),
            name: Set(user.name.clone()),
        };

        users::Entity::insert(model)
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    debug!(user_id = %user.id, "user already exists");
                    DomainError::duplicated(&user.id, &user.name)
                } else {
                    map_db_err(e, self.call("insert", INSERT_SQL))
                }
            })?;

        Ok(())
    }
}
