use diesel::connection::{AnsiTransactionManager, TransactionManager};
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel_migrations::MigrationHarness;

use crate::config::DatabaseSettings;
use crate::domain::errors::DomainError;

pub type DbPool = Pool<ConnectionManager<PgConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<PgConnection>>;

pub type MigrationError = Box<dyn std::error::Error + Send + Sync>;

pub fn create_pool(settings: &DatabaseSettings) -> Result<DbPool, r2d2::Error> {
    let manager = ConnectionManager::<PgConnection>::new(settings.url.as_str());
    Pool::builder()
        .max_size(settings.max_pool_size)
        .connection_timeout(settings.connection_timeout)
        .build(manager)
}

/// Shared handle to the order store.
///
/// Cloning is cheap; every clone uses the same pool.
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
}

impl Database {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn connect(settings: &DatabaseSettings) -> Result<Self, r2d2::Error> {
        create_pool(settings).map(Self::new)
    }

    /// Check out a connection for a single statement or an unguarded sequence.
    pub fn connection(&self) -> Result<DbConnection, DomainError> {
        Ok(self.pool.get()?)
    }

    /// Run `work` inside one transaction.
    ///
    /// Commits when `work` succeeds and rolls back everything otherwise. A
    /// failed commit is reported as `CommitFailed`; the error returned by
    /// `work` is passed through untouched.
    pub fn unit_of_work<T, F>(&self, work: F) -> Result<T, DomainError>
    where
        F: FnOnce(&mut PgConnection) -> Result<T, DomainError>,
    {
        let mut conn = self.connection()?;
        let conn: &mut PgConnection = &mut conn;

        AnsiTransactionManager::begin_transaction(conn)?;

        match work(conn) {
            Ok(value) => {
                AnsiTransactionManager::commit_transaction(conn)
                    .map_err(|e| DomainError::CommitFailed(e.to_string()))?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = AnsiTransactionManager::rollback_transaction(conn) {
                    log::error!("Rollback after '{}' failed: {}", err, rollback_err);
                }
                Err(err)
            }
        }
    }

    /// Apply any pending embedded migrations.
    pub fn run_migrations(&self) -> Result<(), MigrationError> {
        let mut conn = self.pool.get()?;
        let applied = conn.run_pending_migrations(crate::MIGRATIONS)?;
        for version in applied {
            log::info!("Applied migration {}", version);
        }
        Ok(())
    }
}
