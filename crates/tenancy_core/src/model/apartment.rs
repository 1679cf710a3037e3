//! Apartment domain model.
//!
//! # Invariants
//! - `owner_id` references an existing user.
//! - `renter_id`, when present, references an existing user who rents no
//!   other apartment.
//! - An apartment with a renter is occupied and cannot be deleted.

use super::ids::{ApartmentId, UserId};
use super::{require_text, FieldError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Mutable apartment fields supplied on create and replaced on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApartmentDetails {
    pub title: String,
    pub description: String,
    pub number_of_bedrooms: i32,
    pub number_of_bathrooms: i32,
    pub state: String,
    pub city: String,
    pub square_feet: i32,
    /// Minor currency units (cents).
    pub monthly_rent: i64,
    pub available: bool,
    pub owner_id: UserId,
    /// `None` means vacant.
    pub renter_id: Option<UserId>,
}

impl ApartmentDetails {
    /// Checks numeric ranges and required text.
    pub fn validate(&self) -> Result<(), FieldError> {
        require_text("title", &self.title)?;
        require_text("state", &self.state)?;
        require_text("city", &self.city)?;

        if self.number_of_bedrooms < 0 {
            return Err(FieldError::OutOfRange {
                field: "number of bedrooms",
                requirement: "greater than or equal to zero",
            });
        }
        if self.number_of_bathrooms <= 0 {
            return Err(FieldError::OutOfRange {
                field: "number of bathrooms",
                requirement: "greater than zero",
            });
        }
        if self.square_feet <= 0 {
            return Err(FieldError::OutOfRange {
                field: "square footage",
                requirement: "greater than zero",
            });
        }
        if self.monthly_rent <= 0 {
            return Err(FieldError::OutOfRange {
                field: "monthly rent",
                requirement: "greater than zero",
            });
        }

        Ok(())
    }

    pub fn is_occupied(&self) -> bool {
        self.renter_id.is_some()
    }
}

/// Stored apartment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Apartment {
    pub id: ApartmentId,
    /// Assigned by the store on insert.
    pub date_listed: NaiveDate,
    #[serde(flatten)]
    pub details: ApartmentDetails,
}

#[cfg(test)]
mod tests {
    use super::ApartmentDetails;
    use crate::model::ids::UserId;
    use crate::model::FieldError;

    fn details() -> ApartmentDetails {
        ApartmentDetails {
            title: "Sunny loft".to_string(),
            description: String::new(),
            number_of_bedrooms: 0,
            number_of_bathrooms: 1,
            state: "VA".to_string(),
            city: "Richmond".to_string(),
            square_feet: 450,
            monthly_rent: 120_000,
            available: true,
            owner_id: UserId(1),
            renter_id: None,
        }
    }

    #[test]
    fn studio_without_bedrooms_is_valid() {
        assert_eq!(details().validate(), Ok(()));
        assert!(!details().is_occupied());
    }

    #[test]
    fn zero_bathrooms_rejected() {
        let mut candidate = details();
        candidate.number_of_bathrooms = 0;
        assert!(matches!(
            candidate.validate(),
            Err(FieldError::OutOfRange {
                field: "number of bathrooms",
                ..
            })
        ));
    }

    #[test]
    fn non_positive_rent_rejected() {
        let mut candidate = details();
        candidate.monthly_rent = 0;
        let err = candidate.validate().unwrap_err();
        assert_eq!(err.to_string(), "monthly rent must be greater than zero");
    }

    #[test]
    fn serializes_vacant_renter_as_null() {
        let json = serde_json::to_value(details()).unwrap();
        assert!(json["renter_id"].is_null());
        assert_eq!(json["owner_id"], 1);
    }
}
