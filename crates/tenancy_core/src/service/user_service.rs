//! User lifecycle service.

use super::log_failure;
use crate::cascade::{self, CascadeReport};
use crate::error::{DomainError, DomainResult};
use crate::model::ids::UserId;
use crate::model::today_utc;
use crate::model::user::{User, UserDetails};
use crate::repo::EntityStore;
use crate::validation::{self, validate_existing_user, validate_new_user};
use log::info;

/// Use-case service for user CRUD.
pub struct UserService<S: EntityStore> {
    store: S,
}

impl<S: EntityStore> UserService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validates and inserts a user.
    ///
    /// # Errors
    /// - `Invalid` on field rules, `DuplicateEmail`, `DuplicatePhoneNumber`.
    pub fn create(&self, details: UserDetails) -> DomainResult<User> {
        let result = validate_new_user(&self.store, &details, today_utc())
            .and_then(|()| self.store.insert_user(&details).map_err(DomainError::from));
        match &result {
            Ok(user) => info!(
                "event=user_create module=service status=ok user_id={}",
                user.id
            ),
            Err(err) => log_failure("user_create", err),
        }
        result
    }

    pub fn get(&self, id: UserId) -> DomainResult<Option<User>> {
        Ok(self.store.find_user(id)?)
    }

    pub fn list_all(&self) -> DomainResult<Vec<User>> {
        Ok(self.store.find_all_users()?)
    }

    /// Replaces all mutable fields of an existing user.
    ///
    /// `date_joined` on the argument is ignored.
    pub fn update(&self, user: &User) -> DomainResult<()> {
        let result = self.try_update(user);
        match &result {
            Ok(()) => info!(
                "event=user_update module=service status=ok user_id={}",
                user.id
            ),
            Err(err) => log_failure("user_update", err),
        }
        result
    }

    /// Deletes a user and cascades to owned apartments and applications.
    ///
    /// # Errors
    /// - `UserNotFound`, `UserRenting`, `UserOwnsOccupiedApartment`.
    pub fn delete(&self, id: UserId) -> DomainResult<CascadeReport> {
        let result = cascade::delete_user(&self.store, id);
        match &result {
            Ok(report) => info!(
                "event=user_delete module=service status=ok user_id={id} apartments_removed={} applications_removed={}",
                report.apartments_removed, report.applications_removed
            ),
            Err(err) => log_failure("user_delete", err),
        }
        result
    }

    /// Returns `false` for an absent id without querying the store.
    pub fn exists(&self, id: Option<UserId>) -> DomainResult<bool> {
        Ok(validation::user_exists(&self.store, id)?)
    }

    fn try_update(&self, user: &User) -> DomainResult<()> {
        if !self.store.user_exists(user.id)? {
            return Err(DomainError::UserNotFound(user.id));
        }
        validate_existing_user(&self.store, user, today_utc())?;
        if self.store.update_user(user)? == 0 {
            return Err(DomainError::UserNotFound(user.id));
        }
        Ok(())
    }
}
