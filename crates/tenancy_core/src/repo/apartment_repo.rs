//! Apartment persistence over the `apartments` table.

use super::{RepoError, RepoResult, SqliteStore};
use crate::model::apartment::{Apartment, ApartmentDetails};
use crate::model::ids::{ApartmentId, UserId};
use rusqlite::{params, OptionalExtension, Row};

const APARTMENT_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    number_of_bedrooms,
    number_of_bathrooms,
    state,
    city,
    square_feet,
    monthly_rent,
    date_listed,
    available,
    owner_id,
    renter_id
FROM apartments";

/// Repository interface for apartment rows.
pub trait ApartmentRepository {
    /// Inserts a row and returns it with the assigned id and listing date.
    fn insert_apartment(&self, details: &ApartmentDetails) -> RepoResult<Apartment>;
    fn find_apartment(&self, id: ApartmentId) -> RepoResult<Option<Apartment>>;
    /// All apartments ordered by id.
    fn find_all_apartments(&self) -> RepoResult<Vec<Apartment>>;
    /// Replaces every mutable field; `date_listed` is left untouched.
    fn update_apartment(&self, apartment: &Apartment) -> RepoResult<usize>;
    fn delete_apartment(&self, id: ApartmentId) -> RepoResult<usize>;
    /// Ids of apartments owned by `owner`, ordered by id.
    fn apartment_ids_owned_by(&self, owner: UserId) -> RepoResult<Vec<ApartmentId>>;
}

impl ApartmentRepository for SqliteStore<'_> {
    fn insert_apartment(&self, details: &ApartmentDetails) -> RepoResult<Apartment> {
        self.conn.execute(
            "INSERT INTO apartments (
                title,
                description,
                number_of_bedrooms,
                number_of_bathrooms,
                state,
                city,
                square_feet,
                monthly_rent,
                available,
                owner_id,
                renter_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11);",
            params![
                details.title.as_str(),
                details.description.as_str(),
                details.number_of_bedrooms,
                details.number_of_bathrooms,
                details.state.as_str(),
                details.city.as_str(),
                details.square_feet,
                details.monthly_rent,
                details.available,
                details.owner_id,
                details.renter_id,
            ],
        )?;

        let id = ApartmentId(self.conn.last_insert_rowid());
        self.find_apartment(id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("apartment {id} missing after insert"))
        })
    }

    fn find_apartment(&self, id: ApartmentId) -> RepoResult<Option<Apartment>> {
        let apartment = self
            .conn
            .query_row(
                &format!("{APARTMENT_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_apartment_row,
            )
            .optional()?;
        Ok(apartment)
    }

    fn find_all_apartments(&self) -> RepoResult<Vec<Apartment>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{APARTMENT_SELECT_SQL} ORDER BY id ASC;"))?;
        let apartments = stmt
            .query_map([], parse_apartment_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(apartments)
    }

    fn update_apartment(&self, apartment: &Apartment) -> RepoResult<usize> {
        let details = &apartment.details;
        let changed = self.conn.execute(
            "UPDATE apartments
             SET
                title = ?1,
                description = ?2,
                number_of_bedrooms = ?3,
                number_of_bathrooms = ?4,
                state = ?5,
                city = ?6,
                square_feet = ?7,
                monthly_rent = ?8,
                available = ?9,
                owner_id = ?10,
                renter_id = ?11
             WHERE id = ?12;",
            params![
                details.title.as_str(),
                details.description.as_str(),
                details.number_of_bedrooms,
                details.number_of_bathrooms,
                details.state.as_str(),
                details.city.as_str(),
                details.square_feet,
                details.monthly_rent,
                details.available,
                details.owner_id,
                details.renter_id,
                apartment.id,
            ],
        )?;
        Ok(changed)
    }

    fn delete_apartment(&self, id: ApartmentId) -> RepoResult<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM apartments WHERE id = ?1;", [id])?;
        Ok(changed)
    }

    fn apartment_ids_owned_by(&self, owner: UserId) -> RepoResult<Vec<ApartmentId>> {
        let mut stmt = self.conn.prepare(
            "SELECT id
             FROM apartments
             WHERE owner_id = ?1
             ORDER BY id ASC;",
        )?;
        let ids = stmt
            .query_map([owner], |row| row.get(0))?
            .collect::<Result<Vec<ApartmentId>, _>>()?;
        Ok(ids)
    }
}

fn parse_apartment_row(row: &Row<'_>) -> rusqlite::Result<Apartment> {
    Ok(Apartment {
        id: row.get("id")?,
        date_listed: row.get("date_listed")?,
        details: ApartmentDetails {
            title: row.get("title")?,
            description: row.get("description")?,
            number_of_bedrooms: row.get("number_of_bedrooms")?,
            number_of_bathrooms: row.get("number_of_bathrooms")?,
            state: row.get("state")?,
            city: row.get("city")?,
            square_feet: row.get("square_feet")?,
            monthly_rent: row.get("monthly_rent")?,
            available: row.get("available")?,
            owner_id: row.get("owner_id")?,
            renter_id: row.get("renter_id")?,
        },
    })
}
