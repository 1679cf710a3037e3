//! Application persistence over the `applications` table.

use super::{RepoError, RepoResult, SqliteStore};
use crate::model::application::{Application, ApplicationDetails};
use crate::model::ids::{ApartmentId, ApplicationId, UserId};
use rusqlite::{params, OptionalExtension, Row};

const APPLICATION_SELECT_SQL: &str = "SELECT
    id,
    date_submitted,
    active,
    successful,
    user_id,
    apartment_id
FROM applications";

/// Repository interface for application rows.
pub trait ApplicationRepository {
    /// Inserts a row and returns it with the assigned id and submission date.
    fn insert_application(&self, details: &ApplicationDetails) -> RepoResult<Application>;
    fn find_application(&self, id: ApplicationId) -> RepoResult<Option<Application>>;
    /// All applications ordered by id.
    fn find_all_applications(&self) -> RepoResult<Vec<Application>>;
    /// Replaces every mutable field; `date_submitted` is left untouched.
    fn update_application(&self, application: &Application) -> RepoResult<usize>;
    fn delete_application(&self, id: ApplicationId) -> RepoResult<usize>;
    /// Deletes every application targeting `apartment`.
    fn delete_applications_for_apartment(&self, apartment: ApartmentId) -> RepoResult<usize>;
    /// Deletes every application submitted by `user`.
    fn delete_applications_for_user(&self, user: UserId) -> RepoResult<usize>;
}

impl ApplicationRepository for SqliteStore<'_> {
    fn insert_application(&self, details: &ApplicationDetails) -> RepoResult<Application> {
        self.conn.execute(
            "INSERT INTO applications (
                active,
                successful,
                user_id,
                apartment_id
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                details.active,
                details.successful,
                details.user_id,
                details.apartment_id,
            ],
        )?;

        let id = ApplicationId(self.conn.last_insert_rowid());
        self.find_application(id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("application {id} missing after insert"))
        })
    }

    fn find_application(&self, id: ApplicationId) -> RepoResult<Option<Application>> {
        let application = self
            .conn
            .query_row(
                &format!("{APPLICATION_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_application_row,
            )
            .optional()?;
        Ok(application)
    }

    fn find_all_applications(&self) -> RepoResult<Vec<Application>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{APPLICATION_SELECT_SQL} ORDER BY id ASC;"))?;
        let applications = stmt
            .query_map([], parse_application_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(applications)
    }

    fn update_application(&self, application: &Application) -> RepoResult<usize> {
        let details = &application.details;
        let changed = self.conn.execute(
            "UPDATE applications
             SET
                active = ?1,
                successful = ?2,
                user_id = ?3,
                apartment_id = ?4
             WHERE id = ?5;",
            params![
                details.active,
                details.successful,
                details.user_id,
                details.apartment_id,
                application.id,
            ],
        )?;
        Ok(changed)
    }

    fn delete_application(&self, id: ApplicationId) -> RepoResult<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM applications WHERE id = ?1;", [id])?;
        Ok(changed)
    }

    fn delete_applications_for_apartment(&self, apartment: ApartmentId) -> RepoResult<usize> {
        let changed = self.conn.execute(
            "DELETE FROM applications WHERE apartment_id = ?1;",
            [apartment],
        )?;
        Ok(changed)
    }

    fn delete_applications_for_user(&self, user: UserId) -> RepoResult<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM applications WHERE user_id = ?1;", [user])?;
        Ok(changed)
    }
}

fn parse_application_row(row: &Row<'_>) -> rusqlite::Result<Application> {
    Ok(Application {
        id: row.get("id")?,
        date_submitted: row.get("date_submitted")?,
        details: ApplicationDetails {
            active: row.get("active")?,
            successful: row.get("successful")?,
            user_id: row.get("user_id")?,
            apartment_id: row.get("apartment_id")?,
        },
    })
}
