//! User domain model.
//!
//! # Invariants
//! - `email` and `phone_number` are unique across users (checked by the
//!   validation engine, backed by schema `UNIQUE` constraints).
//! - `phone_number` is exactly ten ASCII digits.
//! - Age derived from `birth_date` stays within `MIN_AGE_YEARS..=MAX_AGE_YEARS`.
//! - `id` and `date_joined` never change after creation.

use super::ids::UserId;
use super::{require_text, FieldError};
use chrono::{Months, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Youngest admissible age in whole years.
pub const MIN_AGE_YEARS: u32 = 18;
/// Oldest admissible age in whole years.
pub const MAX_AGE_YEARS: u32 = 100;

static PHONE_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("valid phone number regex"));

/// Mutable user fields supplied on create and replaced on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Ten digits, no separators.
    pub phone_number: String,
    pub birth_date: NaiveDate,
}

impl UserDetails {
    /// Checks field rules against the given calendar date.
    ///
    /// Age bounds are inclusive: a birth date exactly 18 or exactly 100 years
    /// before `today` passes.
    pub fn validate(&self, today: NaiveDate) -> Result<(), FieldError> {
        require_text("first name", &self.first_name)?;
        require_text("last name", &self.last_name)?;
        require_text("email", &self.email)?;

        if !PHONE_NUMBER_RE.is_match(&self.phone_number) {
            return Err(FieldError::PhoneNumberFormat);
        }

        if self.birth_date < years_before(today, MAX_AGE_YEARS) {
            return Err(FieldError::AgeLimitExceeded);
        }
        if self.birth_date > years_before(today, MIN_AGE_YEARS) {
            return Err(FieldError::Underage);
        }

        Ok(())
    }
}

/// Stored user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Assigned by the store on insert.
    pub date_joined: NaiveDate,
    #[serde(flatten)]
    pub details: UserDetails,
}

// Feb 29 clamps to Feb 28 in non-leap target years.
fn years_before(today: NaiveDate, years: u32) -> NaiveDate {
    today
        .checked_sub_months(Months::new(years * 12))
        .unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::UserDetails;
    use crate::model::FieldError;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn details(birth_date: NaiveDate) -> UserDetails {
        UserDetails {
            first_name: "Conrad".to_string(),
            last_name: "Wiggins".to_string(),
            email: "conrad@example.com".to_string(),
            phone_number: "4876280912".to_string(),
            birth_date,
        }
    }

    #[test]
    fn accepts_adult_with_valid_phone() {
        assert_eq!(details(date(1972, 11, 14)).validate(date(2026, 10, 19)), Ok(()));
    }

    #[test]
    fn age_bounds_are_inclusive() {
        let today = date(2026, 10, 19);
        assert_eq!(details(date(2008, 10, 19)).validate(today), Ok(()));
        assert_eq!(details(date(1926, 10, 19)).validate(today), Ok(()));
        assert_eq!(
            details(date(2008, 10, 20)).validate(today),
            Err(FieldError::Underage)
        );
        assert_eq!(
            details(date(1926, 10, 18)).validate(today),
            Err(FieldError::AgeLimitExceeded)
        );
    }

    #[test]
    fn rejects_malformed_phone_numbers() {
        let today = date(2026, 10, 19);
        for phone in ["123456789", "12345678901", "12345-7890", "abcdefghij"] {
            let mut candidate = details(date(1990, 1, 1));
            candidate.phone_number = phone.to_string();
            assert_eq!(
                candidate.validate(today),
                Err(FieldError::PhoneNumberFormat),
                "{phone} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_blank_names() {
        let mut candidate = details(date(1990, 1, 1));
        candidate.last_name = "   ".to_string();
        assert_eq!(
            candidate.validate(date(2026, 10, 19)),
            Err(FieldError::Blank("last name"))
        );
    }
}
