mod common;

use common::{apartment_details, application_details, count_rows, memory_db, store, user_details};
use tenancy_core::{
    ApartmentService, ApplicationService, CascadeReport, DomainError, ErrorKind, RepoError,
    UserRepository, UserService,
};

#[test]
fn deleting_apartment_removes_its_applications_only() {
    let conn = memory_db();
    let users = UserService::new(store(&conn));
    let apartments = ApartmentService::new(store(&conn));
    let applications = ApplicationService::new(store(&conn));
    let owner = users.create(user_details(1)).unwrap();
    let applicant = users.create(user_details(2)).unwrap();
    let target = apartments.create(apartment_details(owner.id, None)).unwrap();
    let other = apartments.create(apartment_details(owner.id, None)).unwrap();
    applications
        .create(application_details(applicant.id, target.id))
        .unwrap();
    applications
        .create(application_details(owner.id, target.id))
        .unwrap();
    let kept = applications
        .create(application_details(applicant.id, other.id))
        .unwrap();

    let report = apartments.delete(target.id).unwrap();

    assert_eq!(
        report,
        CascadeReport {
            apartments_removed: 1,
            applications_removed: 2,
        }
    );
    assert!(!apartments.exists(Some(target.id)).unwrap());
    assert!(applications.exists(Some(kept.id)).unwrap());
    assert_eq!(count_rows(&conn, "applications"), 1);
}

#[test]
fn deleting_user_removes_owned_apartments_and_related_applications() {
    let conn = memory_db();
    let users = UserService::new(store(&conn));
    let apartments = ApartmentService::new(store(&conn));
    let applications = ApplicationService::new(store(&conn));
    let owner = users.create(user_details(1)).unwrap();
    let applicant = users.create(user_details(2)).unwrap();
    let landlord = users.create(user_details(3)).unwrap();

    let owned_a = apartments.create(apartment_details(owner.id, None)).unwrap();
    let owned_b = apartments.create(apartment_details(owner.id, None)).unwrap();
    let elsewhere = apartments
        .create(apartment_details(landlord.id, None))
        .unwrap();

    // Third-party applications to the owner's apartments.
    applications
        .create(application_details(applicant.id, owned_a.id))
        .unwrap();
    applications
        .create(application_details(applicant.id, owned_b.id))
        .unwrap();
    // The owner's own application to someone else's apartment.
    applications
        .create(application_details(owner.id, elsewhere.id))
        .unwrap();
    let survivor = applications
        .create(application_details(applicant.id, elsewhere.id))
        .unwrap();

    let report = users.delete(owner.id).unwrap();

    assert_eq!(
        report,
        CascadeReport {
            apartments_removed: 2,
            applications_removed: 3,
        }
    );
    assert!(!users.exists(Some(owner.id)).unwrap());
    assert!(apartments.exists(Some(elsewhere.id)).unwrap());
    assert!(applications.exists(Some(survivor.id)).unwrap());
    assert_eq!(count_rows(&conn, "apartments"), 1);
    assert_eq!(count_rows(&conn, "applications"), 1);
}

#[test]
fn user_with_occupied_apartment_is_not_deleted() {
    let conn = memory_db();
    let users = UserService::new(store(&conn));
    let apartments = ApartmentService::new(store(&conn));
    let applications = ApplicationService::new(store(&conn));
    let owner = users.create(user_details(1)).unwrap();
    let renter = users.create(user_details(2)).unwrap();
    let vacant = apartments.create(apartment_details(owner.id, None)).unwrap();
    apartments
        .create(apartment_details(owner.id, Some(renter.id)))
        .unwrap();
    applications
        .create(application_details(renter.id, vacant.id))
        .unwrap();

    let err = users.delete(owner.id).unwrap_err();

    assert!(matches!(err, DomainError::UserOwnsOccupiedApartment(id) if id == owner.id));
    assert_eq!(err.kind(), ErrorKind::DeletionBlocked);
    assert_eq!(count_rows(&conn, "users"), 2);
    assert_eq!(count_rows(&conn, "apartments"), 2);
    assert_eq!(count_rows(&conn, "applications"), 1);
}

#[test]
fn failed_cascade_rolls_back_every_delete() {
    let conn = memory_db();
    let users = UserService::new(store(&conn));
    let apartments = ApartmentService::new(store(&conn));
    let applications = ApplicationService::new(store(&conn));
    let owner = users.create(user_details(1)).unwrap();
    let applicant = users.create(user_details(2)).unwrap();
    let apartment = apartments.create(apartment_details(owner.id, None)).unwrap();
    applications
        .create(application_details(applicant.id, apartment.id))
        .unwrap();

    // Fails the final user-row delete after dependents are already gone.
    conn.execute_batch(
        "CREATE TRIGGER block_user_delete BEFORE DELETE ON users
         BEGIN SELECT RAISE(ABORT, 'user delete blocked'); END;",
    )
    .unwrap();

    let err = users.delete(owner.id).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Store);
    assert!(users.exists(Some(owner.id)).unwrap());
    assert!(apartments.exists(Some(apartment.id)).unwrap());
    assert_eq!(count_rows(&conn, "applications"), 1);
}

#[test]
fn schema_rejects_duplicate_email_that_bypasses_validation() {
    let conn = memory_db();
    let raw = store(&conn);
    raw.insert_user(&user_details(1)).unwrap();

    let mut clash = user_details(2);
    clash.email = user_details(1).email;
    let err = raw.insert_user(&clash).unwrap_err();

    assert!(matches!(err, RepoError::Constraint(_)));
}

#[test]
fn owner_can_be_deleted_after_tenant_moves_out() {
    let conn = memory_db();
    let users = UserService::new(store(&conn));
    let apartments = ApartmentService::new(store(&conn));
    let applications = ApplicationService::new(store(&conn));
    let owner = users.create(user_details(1)).unwrap();
    let renter = users.create(user_details(2)).unwrap();
    let mut apartment = apartments
        .create(apartment_details(owner.id, Some(renter.id)))
        .unwrap();
    applications
        .create(application_details(renter.id, apartment.id))
        .unwrap();

    assert!(matches!(
        users.delete(owner.id).unwrap_err(),
        DomainError::UserOwnsOccupiedApartment(_)
    ));

    apartment.details.renter_id = None;
    apartment.details.available = true;
    apartments.update(&apartment).unwrap();
    let report = users.delete(owner.id).unwrap();

    assert_eq!(
        report,
        CascadeReport {
            apartments_removed: 1,
            applications_removed: 1,
        }
    );
    assert!(users.exists(Some(renter.id)).unwrap());
    assert_eq!(count_rows(&conn, "users"), 1);
    assert_eq!(count_rows(&conn, "apartments"), 0);
    assert_eq!(count_rows(&conn, "applications"), 0);
}
