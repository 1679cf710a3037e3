//! Cross-entity validation engine.
//!
//! # Responsibility
//! - Decide whether a create, update, or delete is admissible given the
//!   current store contents.
//! - Sequence checks in a fixed order so the first failure is deterministic.
//!
//! # Invariants
//! - Rules only read through `EntityLookup`; they never mutate.
//! - Field rules run before any store access.
//! - An absent reference id is treated as "does not exist", never as an error.

use crate::error::{DomainError, DomainResult};
use crate::model::apartment::{Apartment, ApartmentDetails};
use crate::model::application::{Application, ApplicationDetails};
use crate::model::ids::{ApartmentId, ApplicationId, UserId};
use crate::model::user::{User, UserDetails};
use crate::repo::{EntityLookup, Predicate, RepoResult};
use chrono::NaiveDate;
use log::debug;

pub fn user_exists<L>(lookup: &L, id: Option<UserId>) -> RepoResult<bool>
where
    L: EntityLookup + ?Sized,
{
    match id {
        Some(id) => lookup.user_exists(id),
        None => Ok(false),
    }
}

pub fn apartment_exists<L>(lookup: &L, id: Option<ApartmentId>) -> RepoResult<bool>
where
    L: EntityLookup + ?Sized,
{
    match id {
        Some(id) => lookup.apartment_exists(id),
        None => Ok(false),
    }
}

pub fn application_exists<L>(lookup: &L, id: Option<ApplicationId>) -> RepoResult<bool>
where
    L: EntityLookup + ?Sized,
{
    match id {
        Some(id) => lookup.application_exists(id),
        None => Ok(false),
    }
}

/// Fails when another user (other than `excluding`) already has `email`.
pub fn unique_email<L>(lookup: &L, email: &str, excluding: Option<UserId>) -> DomainResult<()>
where
    L: EntityLookup + ?Sized,
{
    if lookup.count_where(&Predicate::UserEmail { email, excluding })? > 0 {
        return Err(DomainError::DuplicateEmail(email.to_string()));
    }
    Ok(())
}

/// Fails when another user (other than `excluding`) already has `phone_number`.
pub fn unique_phone_number<L>(
    lookup: &L,
    phone_number: &str,
    excluding: Option<UserId>,
) -> DomainResult<()>
where
    L: EntityLookup + ?Sized,
{
    let predicate = Predicate::UserPhoneNumber {
        phone_number,
        excluding,
    };
    if lookup.count_where(&predicate)? > 0 {
        return Err(DomainError::DuplicatePhoneNumber(phone_number.to_string()));
    }
    Ok(())
}

/// Fails when `renter` already rents an apartment other than `excluding`.
///
/// A vacant candidate (`renter == None`) always passes.
pub fn unique_renter<L>(
    lookup: &L,
    renter: Option<UserId>,
    excluding: Option<ApartmentId>,
) -> DomainResult<()>
where
    L: EntityLookup + ?Sized,
{
    let Some(renter) = renter else {
        return Ok(());
    };
    if lookup.count_where(&Predicate::ApartmentRenter { renter, excluding })? > 0 {
        return Err(DomainError::DuplicateRenter(renter));
    }
    Ok(())
}

/// Fails when the apartment currently has a renter.
pub fn apartment_vacant<L>(lookup: &L, id: ApartmentId) -> DomainResult<()>
where
    L: EntityLookup + ?Sized,
{
    if lookup.count_where(&Predicate::OccupiedApartment(id))? > 0 {
        return Err(DomainError::ApartmentOccupied(id));
    }
    Ok(())
}

/// Fails when the user rents any apartment.
pub fn user_not_renting<L>(lookup: &L, id: UserId) -> DomainResult<()>
where
    L: EntityLookup + ?Sized,
{
    let predicate = Predicate::ApartmentRenter {
        renter: id,
        excluding: None,
    };
    if lookup.count_where(&predicate)? > 0 {
        return Err(DomainError::UserRenting(id));
    }
    Ok(())
}

/// Fails when any apartment owned by the user has a renter.
pub fn owned_apartments_vacant<L>(lookup: &L, id: UserId) -> DomainResult<()>
where
    L: EntityLookup + ?Sized,
{
    if lookup.count_where(&Predicate::OccupiedApartmentOwnedBy(id))? > 0 {
        return Err(DomainError::UserOwnsOccupiedApartment(id));
    }
    Ok(())
}

pub fn validate_new_user<L>(lookup: &L, details: &UserDetails, today: NaiveDate) -> DomainResult<()>
where
    L: EntityLookup + ?Sized,
{
    debug!("event=validate module=validation rule=new_user");
    details.validate(today)?;
    unique_email(lookup, &details.email, None)?;
    unique_phone_number(lookup, &details.phone_number, None)
}

/// Same as `validate_new_user` but the user's own row never conflicts.
pub fn validate_existing_user<L>(lookup: &L, user: &User, today: NaiveDate) -> DomainResult<()>
where
    L: EntityLookup + ?Sized,
{
    debug!(
        "event=validate module=validation rule=existing_user user_id={}",
        user.id
    );
    user.details.validate(today)?;
    unique_email(lookup, &user.details.email, Some(user.id))?;
    unique_phone_number(lookup, &user.details.phone_number, Some(user.id))
}

pub fn validate_new_apartment<L>(lookup: &L, details: &ApartmentDetails) -> DomainResult<()>
where
    L: EntityLookup + ?Sized,
{
    debug!("event=validate module=validation rule=new_apartment");
    check_apartment_references(lookup, details, None)
}

/// Same as `validate_new_apartment`; re-saving the current renter is allowed.
pub fn validate_existing_apartment<L>(lookup: &L, apartment: &Apartment) -> DomainResult<()>
where
    L: EntityLookup + ?Sized,
{
    debug!(
        "event=validate module=validation rule=existing_apartment apartment_id={}",
        apartment.id
    );
    check_apartment_references(lookup, &apartment.details, Some(apartment.id))
}

pub fn validate_new_application<L>(lookup: &L, details: &ApplicationDetails) -> DomainResult<()>
where
    L: EntityLookup + ?Sized,
{
    debug!("event=validate module=validation rule=new_application");
    check_application_references(lookup, details)
}

pub fn validate_existing_application<L>(lookup: &L, application: &Application) -> DomainResult<()>
where
    L: EntityLookup + ?Sized,
{
    debug!(
        "event=validate module=validation rule=existing_application application_id={}",
        application.id
    );
    check_application_references(lookup, &application.details)
}

pub fn validate_apartment_deletion<L>(lookup: &L, id: ApartmentId) -> DomainResult<()>
where
    L: EntityLookup + ?Sized,
{
    debug!("event=validate module=validation rule=apartment_deletion apartment_id={id}");
    apartment_vacant(lookup, id)
}

/// Both checks run before the caller deletes anything.
pub fn validate_user_deletion<L>(lookup: &L, id: UserId) -> DomainResult<()>
where
    L: EntityLookup + ?Sized,
{
    debug!("event=validate module=validation rule=user_deletion user_id={id}");
    user_not_renting(lookup, id)?;
    owned_apartments_vacant(lookup, id)
}

fn check_apartment_references<L>(
    lookup: &L,
    details: &ApartmentDetails,
    excluding: Option<ApartmentId>,
) -> DomainResult<()>
where
    L: EntityLookup + ?Sized,
{
    details.validate()?;
    require_user(lookup, details.owner_id)?;
    if let Some(renter) = details.renter_id {
        require_user(lookup, renter)?;
    }
    unique_renter(lookup, details.renter_id, excluding)
}

fn check_application_references<L>(lookup: &L, details: &ApplicationDetails) -> DomainResult<()>
where
    L: EntityLookup + ?Sized,
{
    require_user(lookup, details.user_id)?;
    if !lookup.apartment_exists(details.apartment_id)? {
        return Err(DomainError::ApartmentNotFound(details.apartment_id));
    }
    Ok(())
}

fn require_user<L>(lookup: &L, id: UserId) -> DomainResult<()>
where
    L: EntityLookup + ?Sized,
{
    if !lookup.user_exists(id)? {
        return Err(DomainError::UserNotFound(id));
    }
    Ok(())
}
