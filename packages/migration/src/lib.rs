pub use sea_orm_migration::prelude::*;
pub use sea_orm_migration::sea_orm::DatabaseConnection;
use sea_orm_migration::sea_orm::ConnectionTrait;

mod m20240101_000001_create_users; // keep filename + module name in sync

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240101_000001_create_users::Migration)]
    }
}

/// Apply every pending migration.
pub async fn migrate_up(db: &DatabaseConnection) -> Result<(), DbErr> {
    let before = count_applied_migrations(db).await?;
    tracing::info!(
        defined = Migrator::migrations().len(),
        applied = before,
        backend = ?db.get_database_backend(),
        "running migrations"
    );

    match Migrator::up(db, None).await {
        Ok(()) => {
            let after = count_applied_migrations(db).await?;
            tracing::info!(applied = after, "migrations complete");
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "migrations failed");
            Err(e)
        }
    }
}

/// Number of applied migrations; 0 when the bookkeeping table does not
/// exist yet.
pub async fn count_applied_migrations(db: &DatabaseConnection) -> Result<usize, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => Ok(migrations.len()),
        Err(DbErr::Exec(_)) => Ok(0),
        Err(e) => Err(e),
    }
}
