//! User persistence over the `users` table.

use super::{RepoError, RepoResult, SqliteStore};
use crate::model::ids::UserId;
use crate::model::user::{User, UserDetails};
use rusqlite::{params, OptionalExtension, Row};

const USER_SELECT_SQL: &str = "SELECT
    id,
    first_name,
    last_name,
    email,
    phone_number,
    birth_date,
    date_joined
FROM users";

/// Repository interface for user rows.
pub trait UserRepository {
    /// Inserts a row and returns it with the assigned id and join date.
    fn insert_user(&self, details: &UserDetails) -> RepoResult<User>;
    fn find_user(&self, id: UserId) -> RepoResult<Option<User>>;
    /// All users ordered by id.
    fn find_all_users(&self) -> RepoResult<Vec<User>>;
    /// Replaces every mutable field; `date_joined` is left untouched.
    fn update_user(&self, user: &User) -> RepoResult<usize>;
    fn delete_user(&self, id: UserId) -> RepoResult<usize>;
}

impl UserRepository for SqliteStore<'_> {
    fn insert_user(&self, details: &UserDetails) -> RepoResult<User> {
        self.conn.execute(
            "INSERT INTO users (
                first_name,
                last_name,
                email,
                phone_number,
                birth_date
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                details.first_name.as_str(),
                details.last_name.as_str(),
                details.email.as_str(),
                details.phone_number.as_str(),
                details.birth_date,
            ],
        )?;

        let id = UserId(self.conn.last_insert_rowid());
        self.find_user(id)?
            .ok_or_else(|| RepoError::InvalidData(format!("user {id} missing after insert")))
    }

    fn find_user(&self, id: UserId) -> RepoResult<Option<User>> {
        let user = self
            .conn
            .query_row(
                &format!("{USER_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_user_row,
            )
            .optional()?;
        Ok(user)
    }

    fn find_all_users(&self) -> RepoResult<Vec<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} ORDER BY id ASC;"))?;
        let users = stmt
            .query_map([], parse_user_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }

    fn update_user(&self, user: &User) -> RepoResult<usize> {
        let changed = self.conn.execute(
            "UPDATE users
             SET
                first_name = ?1,
                last_name = ?2,
                email = ?3,
                phone_number = ?4,
                birth_date = ?5
             WHERE id = ?6;",
            params![
                user.details.first_name.as_str(),
                user.details.last_name.as_str(),
                user.details.email.as_str(),
                user.details.phone_number.as_str(),
                user.details.birth_date,
                user.id,
            ],
        )?;
        Ok(changed)
    }

    fn delete_user(&self, id: UserId) -> RepoResult<usize> {
        let changed = self.conn.execute("DELETE FROM users WHERE id = ?1;", [id])?;
        Ok(changed)
    }
}

fn parse_user_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get("id")?,
        date_joined: row.get("date_joined")?,
        details: UserDetails {
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            email: row.get("email")?,
            phone_number: row.get("phone_number")?,
            birth_date: row.get("birth_date")?,
        },
    })
}
