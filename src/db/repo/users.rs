//! Account persistence.

use super::{now_ms, Repository};
use crate::db::store::StoreError;
use crate::domain::{StoredUser, User};
use sqlx::Row;

impl Repository {
    /// Insert a new account.
    ///
    /// # Errors
    /// Returns an error if the insert fails; a taken username surfaces as a
    /// unique violation (see [`StoreError::is_unique_violation`]).
    pub async fn insert_user(
        &self,
        username: &str,
        password_hash: &str,
        salt: &str,
    ) -> Result<User, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (username, password_hash, salt, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(salt)
        .bind(now_ms())
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        if id <= 0 {
            return Err(StoreError::InvalidIdentity(id));
        }

        Ok(User {
            id,
            username: username.to_string(),
        })
    }

    /// Look up an account by username.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<StoredUser>, StoreError> {
        let row = sqlx::query(
            "SELECT id, username, password_hash, salt FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        let user = row
            .map(|r| -> Result<StoredUser, sqlx::Error> {
                Ok(StoredUser {
                    id: r.try_get("id")?,
                    username: r.try_get("username")?,
                    password_hash: r.try_get("password_hash")?,
                    salt: r.try_get("salt")?,
                })
            })
            .transpose()?;
        Ok(user)
    }
}
