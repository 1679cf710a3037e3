//! Domain error surfaced by the validation engine, services, and cascades.
//!
//! # Invariants
//! - Every variant maps to exactly one `ErrorKind`.
//! - Messages carry the offending id or value and nothing else from the row.

use crate::db::DbError;
use crate::model::ids::{ApartmentId, ApplicationId, UserId};
use crate::model::FieldError;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type DomainResult<T> = Result<T, DomainError>;

/// Coarse classification a boundary layer maps to a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A referenced id does not exist.
    NotFound,
    /// Email, phone number, or renter uniqueness would be violated.
    Duplicate,
    /// Delete refused by an admissibility rule.
    DeletionBlocked,
    /// A field-level rule failed.
    Invalid,
    /// The store itself failed.
    Store,
}

impl ErrorKind {
    /// Stable snake_case label used in log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Duplicate => "duplicate",
            Self::DeletionBlocked => "deletion_blocked",
            Self::Invalid => "invalid",
            Self::Store => "store",
        }
    }
}

#[derive(Debug)]
pub enum DomainError {
    UserNotFound(UserId),
    ApartmentNotFound(ApartmentId),
    ApplicationNotFound(ApplicationId),
    DuplicateEmail(String),
    DuplicatePhoneNumber(String),
    /// The user already rents another apartment.
    DuplicateRenter(UserId),
    /// Apartment has a renter and cannot be deleted.
    ApartmentOccupied(ApartmentId),
    /// User rents an apartment and cannot be deleted.
    UserRenting(UserId),
    /// User owns an apartment rented by someone and cannot be deleted.
    UserOwnsOccupiedApartment(UserId),
    Invalid(FieldError),
    Repo(RepoError),
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UserNotFound(_) | Self::ApartmentNotFound(_) | Self::ApplicationNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::DuplicateEmail(_) | Self::DuplicatePhoneNumber(_) | Self::DuplicateRenter(_) => {
                ErrorKind::Duplicate
            }
            Self::ApartmentOccupied(_)
            | Self::UserRenting(_)
            | Self::UserOwnsOccupiedApartment(_) => ErrorKind::DeletionBlocked,
            Self::Invalid(_) => ErrorKind::Invalid,
            Self::Repo(_) => ErrorKind::Store,
        }
    }
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UserNotFound(id) => write!(f, "user with id {id} does not exist"),
            Self::ApartmentNotFound(id) => write!(f, "apartment with id {id} does not exist"),
            Self::ApplicationNotFound(id) => {
                write!(f, "application with id {id} does not exist")
            }
            Self::DuplicateEmail(email) => {
                write!(f, "a user with email {email} already exists")
            }
            Self::DuplicatePhoneNumber(phone) => {
                write!(f, "a user with phone number {phone} already exists")
            }
            Self::DuplicateRenter(id) => write!(
                f,
                "user with id {id} is already renting a different apartment; a user can only rent one apartment at a time"
            ),
            Self::ApartmentOccupied(id) => {
                write!(f, "apartment with id {id} cannot be deleted: occupied")
            }
            Self::UserRenting(id) => {
                write!(f, "user with id {id} cannot be deleted: renting an apartment")
            }
            Self::UserOwnsOccupiedApartment(id) => write!(
                f,
                "user with id {id} cannot be deleted: owns an occupied apartment"
            ),
            Self::Invalid(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DomainError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FieldError> for DomainError {
    fn from(value: FieldError) -> Self {
        Self::Invalid(value)
    }
}

impl From<RepoError> for DomainError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<DbError> for DomainError {
    fn from(value: DbError) -> Self {
        Self::Repo(RepoError::Db(value))
    }
}
