//! Domain model for users, apartments, and applications.
//!
//! # Responsibility
//! - Define the canonical records shared by repositories and services.
//! - Own field-level rules that need no store access.
//!
//! # Invariants
//! - Identifiers and creation dates are assigned by the store, never by callers.
//! - Mutable fields live in `*Details` structs; stored entities wrap them.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod apartment;
pub mod application;
pub mod ids;
pub mod user;

/// Field-level rule violation detected before any store access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// Required text field is empty after trim.
    Blank(&'static str),
    /// Numeric field is outside its allowed range.
    OutOfRange {
        field: &'static str,
        requirement: &'static str,
    },
    /// Phone number is not exactly ten ASCII digits.
    PhoneNumberFormat,
    /// Birth date is more than the maximum age in the past.
    AgeLimitExceeded,
    /// Birth date is less than the minimum age in the past.
    Underage,
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blank(field) => write!(f, "{field} must not be blank"),
            Self::OutOfRange { field, requirement } => write!(f, "{field} must be {requirement}"),
            Self::PhoneNumberFormat => write!(f, "phone number must be in the format 1234567890"),
            Self::AgeLimitExceeded => write!(f, "age limit exceeded"),
            Self::Underage => write!(
                f,
                "must be at least {} years of age",
                user::MIN_AGE_YEARS
            ),
        }
    }
}

impl Error for FieldError {}

/// Returns the UTC calendar date used for age checks.
///
/// Matches the store's `date('now')` default for creation dates.
pub fn today_utc() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        return Err(FieldError::Blank(field));
    }
    Ok(())
}
