//! Entity store contracts and the SQLite implementation.
//!
//! # Responsibility
//! - Define per-table persistence contracts (`UserRepository`,
//!   `ApartmentRepository`, `ApplicationRepository`).
//! - Define the read-only port consumed by the validation engine
//!   (`EntityLookup`) and the transaction boundary (`UnitOfWork`).
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Repositories never evaluate cross-entity rules; that is the validation
//!   engine's job.
//! - Identifiers and creation dates are assigned by SQLite on insert.
//! - Mutations report affected row counts; callers decide what zero means.

use crate::db::DbError;
use rusqlite::ErrorCode;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod apartment_repo;
pub mod application_repo;
pub mod lookup;
mod store;
pub mod user_repo;

pub use apartment_repo::ApartmentRepository;
pub use application_repo::ApplicationRepository;
pub use lookup::{EntityLookup, Predicate};
pub use store::{SqliteStore, UnitOfWork};
pub use user_repo::UserRepository;

pub type RepoResult<T> = Result<T, RepoError>;

/// Store failure surfaced to services as an internal error.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// A schema constraint (unique, foreign key, check) rejected the write.
    Constraint(String),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Persisted data cannot be converted to a valid model.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Constraint(message) => write!(f, "store constraint violated: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "entity store requires schema version {expected_version}, got {actual_version}"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Constraint(_) | Self::UninitializedConnection { .. } | Self::InvalidData(_) => {
                None
            }
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::SqliteFailure(err, message)
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Self::Constraint(message.unwrap_or_else(|| err.to_string()))
            }
            other => Self::Db(DbError::Sqlite(other)),
        }
    }
}

/// Everything the lifecycle services and cascade resolver need from a store.
pub trait EntityStore:
    UserRepository + ApartmentRepository + ApplicationRepository + EntityLookup + UnitOfWork
{
}

impl<T> EntityStore for T where
    T: UserRepository + ApartmentRepository + ApplicationRepository + EntityLookup + UnitOfWork
{
}

pub(crate) fn count_from_sql(value: i64, what: &str) -> RepoResult<u64> {
    u64::try_from(value)
        .map_err(|_| RepoError::InvalidData(format!("negative {what} count `{value}`")))
}
