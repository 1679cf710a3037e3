//! Shared fixtures for integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use rusqlite::Connection;
use tenancy_core::{
    open_db_in_memory, ApartmentDetails, ApartmentId, ApplicationDetails, SqliteStore,
    UserDetails, UserId,
};

pub fn memory_db() -> Connection {
    open_db_in_memory().unwrap()
}

pub fn store(conn: &Connection) -> SqliteStore<'_> {
    SqliteStore::try_new(conn).unwrap()
}

/// Valid user details; `n` keeps email and phone number unique.
pub fn user_details(n: u32) -> UserDetails {
    UserDetails {
        first_name: format!("First{n}"),
        last_name: format!("Last{n}"),
        email: format!("user{n}@example.com"),
        phone_number: format!("{:010}", 5_550_000_000_u64 + u64::from(n)),
        birth_date: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
    }
}

pub fn apartment_details(owner_id: UserId, renter_id: Option<UserId>) -> ApartmentDetails {
    ApartmentDetails {
        title: "Sunny two-bedroom".to_string(),
        description: "Close to the park".to_string(),
        number_of_bedrooms: 2,
        number_of_bathrooms: 1,
        state: "OR".to_string(),
        city: "Portland".to_string(),
        square_feet: 850,
        monthly_rent: 1_650,
        available: renter_id.is_none(),
        owner_id,
        renter_id,
    }
}

pub fn application_details(user_id: UserId, apartment_id: ApartmentId) -> ApplicationDetails {
    ApplicationDetails {
        active: true,
        successful: false,
        user_id,
        apartment_id,
    }
}

pub fn count_rows(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })
    .unwrap()
}
