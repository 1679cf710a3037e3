//! SQLite-backed entity store handle and transaction boundary.

use super::{RepoError, RepoResult};
use crate::db::migrations::{latest_version, schema_version};
use rusqlite::{Connection, Transaction, TransactionBehavior};

/// Runs a group of store calls atomically.
pub trait UnitOfWork {
    /// Executes `work` inside one transaction.
    ///
    /// Commits when `work` returns `Ok`; rolls back when it returns `Err` or
    /// panics. Not reentrant: calling it from inside `work` fails with a store
    /// error.
    fn atomically<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&Self) -> Result<T, E>,
        E: From<RepoError>;
}

/// Entity store over one migrated SQLite connection.
///
/// Cheap to copy; every copy borrows the same connection, so statements issued
/// through any copy join an open `atomically` transaction.
#[derive(Debug, Clone, Copy)]
pub struct SqliteStore<'conn> {
    pub(super) conn: &'conn Connection,
}

impl<'conn> SqliteStore<'conn> {
    /// Creates a store from a connection returned by `open_db*`.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations were not applied.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let actual_version = schema_version(conn)?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }
}

impl UnitOfWork for SqliteStore<'_> {
    fn atomically<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&Self) -> Result<T, E>,
        E: From<RepoError>,
    {
        // Immediate: take the write lock before the first read so admissibility
        // checks and deletes see the same snapshot.
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)
            .map_err(RepoError::from)?;
        let value = work(self)?;
        tx.commit().map_err(RepoError::from)?;
        Ok(value)
    }
}
