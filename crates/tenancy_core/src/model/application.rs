//! Rental application domain model.
//!
//! A user may apply to many apartments and an apartment may receive many
//! applications; duplicate (user, apartment) pairs are allowed.

use super::ids::{ApartmentId, ApplicationId, UserId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Mutable application fields supplied on create and replaced on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationDetails {
    pub active: bool,
    pub successful: bool,
    /// Applicant.
    pub user_id: UserId,
    pub apartment_id: ApartmentId,
}

/// Stored application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    /// Assigned by the store on insert.
    pub date_submitted: NaiveDate,
    #[serde(flatten)]
    pub details: ApplicationDetails,
}
