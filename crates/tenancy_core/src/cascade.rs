//! Dependency-aware deletion for users and apartments.
//!
//! # Responsibility
//! - Evaluate deletion admissibility, then remove dependents, then the row.
//!
//! # Invariants
//! - Every public entry point runs inside one `UnitOfWork` transaction; any
//!   failure leaves the store exactly as it was.
//! - Admissibility is fully evaluated before the first delete.
//! - Applications are never blocking; they are always removable.

use crate::error::{DomainError, DomainResult};
use crate::model::ids::{ApartmentId, UserId};
use crate::repo::{ApartmentRepository, ApplicationRepository, EntityStore};
use crate::validation::{validate_apartment_deletion, validate_user_deletion};

/// Rows removed by one cascading delete, excluding the root user row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeReport {
    pub apartments_removed: usize,
    pub applications_removed: usize,
}

impl CascadeReport {
    fn absorb(&mut self, other: CascadeReport) {
        self.apartments_removed += other.apartments_removed;
        self.applications_removed += other.applications_removed;
    }
}

/// Deletes a vacant apartment and every application targeting it.
///
/// # Errors
/// - `ApartmentNotFound` when the id does not exist.
/// - `ApartmentOccupied` when the apartment has a renter.
pub fn delete_apartment<S: EntityStore>(store: &S, id: ApartmentId) -> DomainResult<CascadeReport> {
    store.atomically(|store| {
        if !store.apartment_exists(id)? {
            return Err(DomainError::ApartmentNotFound(id));
        }
        validate_apartment_deletion(store, id)?;
        remove_apartment(store, id)
    })
}

/// Deletes a user, the apartments they own, and all related applications.
///
/// # Errors
/// - `UserNotFound` when the id does not exist.
/// - `UserRenting` when the user rents any apartment.
/// - `UserOwnsOccupiedApartment` when an owned apartment has a renter.
pub fn delete_user<S: EntityStore>(store: &S, id: UserId) -> DomainResult<CascadeReport> {
    store.atomically(|store| {
        if !store.user_exists(id)? {
            return Err(DomainError::UserNotFound(id));
        }
        validate_user_deletion(store, id)?;

        let mut report = CascadeReport::default();
        // Owned apartments are known vacant here, so no per-apartment check.
        for apartment_id in store.apartment_ids_owned_by(id)? {
            report.absorb(remove_apartment(store, apartment_id)?);
        }
        // Whatever is left was submitted for apartments owned by others.
        report.applications_removed += store.delete_applications_for_user(id)?;

        if store.delete_user(id)? == 0 {
            return Err(DomainError::UserNotFound(id));
        }
        Ok(report)
    })
}

fn remove_apartment<S>(store: &S, id: ApartmentId) -> DomainResult<CascadeReport>
where
    S: ApartmentRepository + ApplicationRepository,
{
    let applications_removed = store.delete_applications_for_apartment(id)?;
    if store.delete_apartment(id)? == 0 {
        return Err(DomainError::ApartmentNotFound(id));
    }
    Ok(CascadeReport {
        apartments_removed: 1,
        applications_removed,
    })
}
