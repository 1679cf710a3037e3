//! Apartment lifecycle service.

use super::log_failure;
use crate::cascade::{self, CascadeReport};
use crate::error::{DomainError, DomainResult};
use crate::model::apartment::{Apartment, ApartmentDetails};
use crate::model::ids::ApartmentId;
use crate::repo::EntityStore;
use crate::validation::{self, validate_existing_apartment, validate_new_apartment};
use log::info;

/// Use-case service for apartment CRUD.
pub struct ApartmentService<S: EntityStore> {
    store: S,
}

impl<S: EntityStore> ApartmentService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validates references and inserts an apartment.
    ///
    /// # Errors
    /// - `Invalid`, `UserNotFound` (owner, then renter), `DuplicateRenter`.
    pub fn create(&self, details: ApartmentDetails) -> DomainResult<Apartment> {
        let result = validate_new_apartment(&self.store, &details)
            .and_then(|()| self.store.insert_apartment(&details).map_err(DomainError::from));
        match &result {
            Ok(apartment) => info!(
                "event=apartment_create module=service status=ok apartment_id={} owner_id={} occupied={}",
                apartment.id,
                apartment.details.owner_id,
                apartment.details.is_occupied()
            ),
            Err(err) => log_failure("apartment_create", err),
        }
        result
    }

    pub fn get(&self, id: ApartmentId) -> DomainResult<Option<Apartment>> {
        Ok(self.store.find_apartment(id)?)
    }

    pub fn list_all(&self) -> DomainResult<Vec<Apartment>> {
        Ok(self.store.find_all_apartments()?)
    }

    /// Replaces all mutable fields of an existing apartment.
    ///
    /// Setting `renter_id` to `None` vacates the apartment. `date_listed` on
    /// the argument is ignored.
    pub fn update(&self, apartment: &Apartment) -> DomainResult<()> {
        let result = self.try_update(apartment);
        match &result {
            Ok(()) => info!(
                "event=apartment_update module=service status=ok apartment_id={} occupied={}",
                apartment.id,
                apartment.details.is_occupied()
            ),
            Err(err) => log_failure("apartment_update", err),
        }
        result
    }

    /// Deletes a vacant apartment and its applications.
    ///
    /// # Errors
    /// - `ApartmentNotFound`, `ApartmentOccupied`.
    pub fn delete(&self, id: ApartmentId) -> DomainResult<CascadeReport> {
        let result = cascade::delete_apartment(&self.store, id);
        match &result {
            Ok(report) => info!(
                "event=apartment_delete module=service status=ok apartment_id={id} applications_removed={}",
                report.applications_removed
            ),
            Err(err) => log_failure("apartment_delete", err),
        }
        result
    }

    /// Returns `false` for an absent id without querying the store.
    pub fn exists(&self, id: Option<ApartmentId>) -> DomainResult<bool> {
        Ok(validation::apartment_exists(&self.store, id)?)
    }

    fn try_update(&self, apartment: &Apartment) -> DomainResult<()> {
        if !self.store.apartment_exists(apartment.id)? {
            return Err(DomainError::ApartmentNotFound(apartment.id));
        }
        validate_existing_apartment(&self.store, apartment)?;
        if self.store.update_apartment(apartment)? == 0 {
            return Err(DomainError::ApartmentNotFound(apartment.id));
        }
        Ok(())
    }
}
