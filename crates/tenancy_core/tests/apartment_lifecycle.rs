mod common;

use common::{apartment_details, application_details, count_rows, memory_db, store, user_details};
use tenancy_core::{
    ApartmentId, ApartmentService, ApplicationService, CascadeReport, DomainError, ErrorKind,
    FieldError, UserId, UserService,
};

#[test]
fn create_requires_existing_owner_and_renter() {
    let conn = memory_db();
    let users = UserService::new(store(&conn));
    let apartments = ApartmentService::new(store(&conn));
    let owner = users.create(user_details(1)).unwrap();

    assert!(matches!(
        apartments
            .create(apartment_details(UserId(77), None))
            .unwrap_err(),
        DomainError::UserNotFound(UserId(77))
    ));
    assert!(matches!(
        apartments
            .create(apartment_details(owner.id, Some(UserId(78))))
            .unwrap_err(),
        DomainError::UserNotFound(UserId(78))
    ));

    let apartment = apartments.create(apartment_details(owner.id, None)).unwrap();
    assert!(!apartment.details.is_occupied());
    assert_eq!(
        apartments.get(apartment.id).unwrap().unwrap(),
        apartment
    );
}

#[test]
fn renter_can_occupy_only_one_apartment() {
    let conn = memory_db();
    let users = UserService::new(store(&conn));
    let apartments = ApartmentService::new(store(&conn));
    let owner = users.create(user_details(1)).unwrap();
    let renter = users.create(user_details(2)).unwrap();
    apartments
        .create(apartment_details(owner.id, Some(renter.id)))
        .unwrap();

    let err = apartments
        .create(apartment_details(owner.id, Some(renter.id)))
        .unwrap_err();
    assert!(matches!(err, DomainError::DuplicateRenter(id) if id == renter.id));
    assert_eq!(err.kind(), ErrorKind::Duplicate);
}

#[test]
fn many_vacant_apartments_per_owner_are_allowed() {
    let conn = memory_db();
    let users = UserService::new(store(&conn));
    let apartments = ApartmentService::new(store(&conn));
    let owner = users.create(user_details(1)).unwrap();

    for _ in 0..3 {
        apartments.create(apartment_details(owner.id, None)).unwrap();
    }
    assert_eq!(apartments.list_all().unwrap().len(), 3);
}

#[test]
fn update_can_keep_move_in_and_vacate_renter() {
    let conn = memory_db();
    let users = UserService::new(store(&conn));
    let apartments = ApartmentService::new(store(&conn));
    let owner = users.create(user_details(1)).unwrap();
    let renter = users.create(user_details(2)).unwrap();
    let mut apartment = apartments
        .create(apartment_details(owner.id, Some(renter.id)))
        .unwrap();

    // Re-saving with the same renter is not a conflict.
    apartment.details.monthly_rent = 1_800;
    apartments.update(&apartment).unwrap();

    apartment.details.renter_id = None;
    apartment.details.available = true;
    apartments.update(&apartment).unwrap();
    let stored = apartments.get(apartment.id).unwrap().unwrap();
    assert_eq!(stored.details.renter_id, None);
    assert_eq!(stored.details.monthly_rent, 1_800);
}

#[test]
fn update_rejects_renter_of_another_apartment() {
    let conn = memory_db();
    let users = UserService::new(store(&conn));
    let apartments = ApartmentService::new(store(&conn));
    let owner = users.create(user_details(1)).unwrap();
    let renter = users.create(user_details(2)).unwrap();
    apartments
        .create(apartment_details(owner.id, Some(renter.id)))
        .unwrap();
    let mut vacant = apartments.create(apartment_details(owner.id, None)).unwrap();

    vacant.details.renter_id = Some(renter.id);
    assert!(matches!(
        apartments.update(&vacant).unwrap_err(),
        DomainError::DuplicateRenter(_)
    ));
}

#[test]
fn update_rejects_out_of_range_fields() {
    let conn = memory_db();
    let users = UserService::new(store(&conn));
    let apartments = ApartmentService::new(store(&conn));
    let owner = users.create(user_details(1)).unwrap();
    let mut apartment = apartments.create(apartment_details(owner.id, None)).unwrap();

    apartment.details.number_of_bathrooms = 0;
    assert!(matches!(
        apartments.update(&apartment).unwrap_err(),
        DomainError::Invalid(FieldError::OutOfRange { .. })
    ));
}

#[test]
fn occupied_apartment_cannot_be_deleted() {
    let conn = memory_db();
    let users = UserService::new(store(&conn));
    let apartments = ApartmentService::new(store(&conn));
    let owner = users.create(user_details(1)).unwrap();
    let renter = users.create(user_details(2)).unwrap();
    let apartment = apartments
        .create(apartment_details(owner.id, Some(renter.id)))
        .unwrap();

    let err = apartments.delete(apartment.id).unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("apartment with id {} cannot be deleted: occupied", apartment.id)
    );
    assert!(apartments.exists(Some(apartment.id)).unwrap());
}

#[test]
fn missing_apartment_reports_not_found() {
    let conn = memory_db();
    let apartments = ApartmentService::new(store(&conn));

    assert!(matches!(
        apartments.delete(ApartmentId(5)).unwrap_err(),
        DomainError::ApartmentNotFound(ApartmentId(5))
    ));
    assert!(apartments.get(ApartmentId(5)).unwrap().is_none());
    assert!(!apartments.exists(None).unwrap());
}

#[test]
fn vacated_apartment_is_deleted_with_its_applications() {
    let conn = memory_db();
    let users = UserService::new(store(&conn));
    let apartments = ApartmentService::new(store(&conn));
    let applications = ApplicationService::new(store(&conn));
    let owner = users.create(user_details(1)).unwrap();
    let renter = users.create(user_details(2)).unwrap();
    let applicant = users.create(user_details(3)).unwrap();
    let mut apartment = apartments
        .create(apartment_details(owner.id, Some(renter.id)))
        .unwrap();
    applications
        .create(application_details(renter.id, apartment.id))
        .unwrap();
    applications
        .create(application_details(applicant.id, apartment.id))
        .unwrap();

    assert!(matches!(
        apartments.delete(apartment.id).unwrap_err(),
        DomainError::ApartmentOccupied(_)
    ));

    apartment.details.renter_id = None;
    apartment.details.available = true;
    apartments.update(&apartment).unwrap();
    let report = apartments.delete(apartment.id).unwrap();

    assert_eq!(
        report,
        CascadeReport {
            apartments_removed: 1,
            applications_removed: 2,
        }
    );
    assert!(!apartments.exists(Some(apartment.id)).unwrap());
    assert_eq!(count_rows(&conn, "apartments"), 0);
    assert_eq!(count_rows(&conn, "applications"), 0);
    assert_eq!(count_rows(&conn, "users"), 3);
}
