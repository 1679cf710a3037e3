//! Read-only store port used by the validation engine.
//!
//! # Invariants
//! - Nothing here mutates state.
//! - `count_where` accepts only the closed set of predicates in `Predicate`.

use super::{count_from_sql, RepoResult, SqliteStore};
use crate::model::ids::{ApartmentId, ApplicationId, UserId};
use rusqlite::{params, ToSql};

/// Row filters the validation engine counts against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate<'a> {
    /// Users with this email, optionally ignoring one user.
    UserEmail {
        email: &'a str,
        excluding: Option<UserId>,
    },
    /// Users with this phone number, optionally ignoring one user.
    UserPhoneNumber {
        phone_number: &'a str,
        excluding: Option<UserId>,
    },
    /// Apartments rented by this user, optionally ignoring one apartment.
    ApartmentRenter {
        renter: UserId,
        excluding: Option<ApartmentId>,
    },
    /// The given apartment, if it has a renter.
    OccupiedApartment(ApartmentId),
    /// Apartments owned by the given user that have a renter.
    OccupiedApartmentOwnedBy(UserId),
}

/// Existence and counting queries over all three tables.
pub trait EntityLookup {
    fn user_exists(&self, id: UserId) -> RepoResult<bool>;
    fn apartment_exists(&self, id: ApartmentId) -> RepoResult<bool>;
    fn application_exists(&self, id: ApplicationId) -> RepoResult<bool>;
    fn count_where(&self, predicate: &Predicate<'_>) -> RepoResult<u64>;
}

impl EntityLookup for SqliteStore<'_> {
    fn user_exists(&self, id: UserId) -> RepoResult<bool> {
        self.row_exists("SELECT EXISTS(SELECT 1 FROM users WHERE id = ?1);", id)
    }

    fn apartment_exists(&self, id: ApartmentId) -> RepoResult<bool> {
        self.row_exists("SELECT EXISTS(SELECT 1 FROM apartments WHERE id = ?1);", id)
    }

    fn application_exists(&self, id: ApplicationId) -> RepoResult<bool> {
        self.row_exists(
            "SELECT EXISTS(SELECT 1 FROM applications WHERE id = ?1);",
            id,
        )
    }

    fn count_where(&self, predicate: &Predicate<'_>) -> RepoResult<u64> {
        let count: i64 = match *predicate {
            Predicate::UserEmail { email, excluding } => self.conn.query_row(
                "SELECT COUNT(*)
                 FROM users
                 WHERE email = ?1
                   AND (?2 IS NULL OR id != ?2);",
                params![email, excluding],
                |row| row.get(0),
            )?,
            Predicate::UserPhoneNumber {
                phone_number,
                excluding,
            } => self.conn.query_row(
                "SELECT COUNT(*)
                 FROM users
                 WHERE phone_number = ?1
                   AND (?2 IS NULL OR id != ?2);",
                params![phone_number, excluding],
                |row| row.get(0),
            )?,
            Predicate::ApartmentRenter { renter, excluding } => self.conn.query_row(
                "SELECT COUNT(*)
                 FROM apartments
                 WHERE renter_id = ?1
                   AND (?2 IS NULL OR id != ?2);",
                params![renter, excluding],
                |row| row.get(0),
            )?,
            Predicate::OccupiedApartment(id) => self.conn.query_row(
                "SELECT COUNT(*)
                 FROM apartments
                 WHERE id = ?1
                   AND renter_id IS NOT NULL;",
                [id],
                |row| row.get(0),
            )?,
            Predicate::OccupiedApartmentOwnedBy(owner) => self.conn.query_row(
                "SELECT COUNT(*)
                 FROM apartments
                 WHERE owner_id = ?1
                   AND renter_id IS NOT NULL;",
                [owner],
                |row| row.get(0),
            )?,
        };
        count_from_sql(count, "predicate")
    }
}

impl SqliteStore<'_> {
    fn row_exists(&self, sql: &str, id: impl ToSql) -> RepoResult<bool> {
        let exists: bool = self.conn.query_row(sql, [id], |row| row.get(0))?;
        Ok(exists)
    }
}
