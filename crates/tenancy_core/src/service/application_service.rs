//! Application lifecycle service.

use super::log_failure;
use crate::error::{DomainError, DomainResult};
use crate::model::application::{Application, ApplicationDetails};
use crate::model::ids::ApplicationId;
use crate::repo::EntityStore;
use crate::validation::{self, validate_existing_application, validate_new_application};
use log::info;

/// Use-case service for application CRUD.
///
/// Applications have no deletion precondition; they also disappear as part
/// of user and apartment cascades.
pub struct ApplicationService<S: EntityStore> {
    store: S,
}

impl<S: EntityStore> ApplicationService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validates references and inserts an application.
    ///
    /// # Errors
    /// - `UserNotFound`, then `ApartmentNotFound`.
    pub fn create(&self, details: ApplicationDetails) -> DomainResult<Application> {
        let result = validate_new_application(&self.store, &details)
            .and_then(|()| self.store.insert_application(&details).map_err(DomainError::from));
        match &result {
            Ok(application) => info!(
                "event=application_create module=service status=ok application_id={} user_id={} apartment_id={}",
                application.id, application.details.user_id, application.details.apartment_id
            ),
            Err(err) => log_failure("application_create", err),
        }
        result
    }

    pub fn get(&self, id: ApplicationId) -> DomainResult<Option<Application>> {
        Ok(self.store.find_application(id)?)
    }

    pub fn list_all(&self) -> DomainResult<Vec<Application>> {
        Ok(self.store.find_all_applications()?)
    }

    /// Replaces all mutable fields of an existing application.
    pub fn update(&self, application: &Application) -> DomainResult<()> {
        let result = self.try_update(application);
        match &result {
            Ok(()) => info!(
                "event=application_update module=service status=ok application_id={}",
                application.id
            ),
            Err(err) => log_failure("application_update", err),
        }
        result
    }

    pub fn delete(&self, id: ApplicationId) -> DomainResult<()> {
        let result = self.try_delete(id);
        match &result {
            Ok(()) => info!("event=application_delete module=service status=ok application_id={id}"),
            Err(err) => log_failure("application_delete", err),
        }
        result
    }

    /// Returns `false` for an absent id without querying the store.
    pub fn exists(&self, id: Option<ApplicationId>) -> DomainResult<bool> {
        Ok(validation::application_exists(&self.store, id)?)
    }

    fn try_update(&self, application: &Application) -> DomainResult<()> {
        if !self.store.application_exists(application.id)? {
            return Err(DomainError::ApplicationNotFound(application.id));
        }
        validate_existing_application(&self.store, application)?;
        if self.store.update_application(application)? == 0 {
            return Err(DomainError::ApplicationNotFound(application.id));
        }
        Ok(())
    }

    fn try_delete(&self, id: ApplicationId) -> DomainResult<()> {
        if !self.store.application_exists(id)? {
            return Err(DomainError::ApplicationNotFound(id));
        }
        if self.store.delete_application(id)? == 0 {
            return Err(DomainError::ApplicationNotFound(id));
        }
        Ok(())
    }
}
