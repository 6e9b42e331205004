use sqlx::SqlitePool;

use crate::{errors::ApiError, models::User};

pub struct UserRepo;

impl UserRepo {
    /// Inserts a new user and returns its id.
    ///
    /// Takes an already-hashed password; cleartext never reaches the store.
    /// A username collision comes back as `DuplicateUsername` so callers can
    /// show it inline.
    pub async fn create(
        pool: &SqlitePool,
        username: &str,
        password_hash: &str,
    ) -> Result<i64, ApiError> {
        let result = sqlx::query("INSERT INTO user (username, password_hash) VALUES (?1, ?2)")
            .bind(username)
            .bind(password_hash)
            .execute(pool)
            .await
            .map_err(|err| {
                if err
                    .as_database_error()
                    .is_some_and(|db| db.is_unique_violation())
                {
                    ApiError::DuplicateUsername(username.to_string())
                } else {
                    ApiError::Store(err)
                }
            })?;

        Ok(result.last_insert_rowid())
    }

    pub async fn find_by_username(
        pool: &SqlitePool,
        username: &str,
    ) -> Result<Option<User>, ApiError> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash FROM user WHERE username = ?1",
        )
        .bind(username)
        .fetch_optional(pool)
        .await
        .map_err(ApiError::Store)
    }

    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>, ApiError> {
        sqlx::query_as::<_, User>("SELECT id, username, password_hash FROM user WHERE id = ?1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(ApiError::Store)
    }

    #[cfg(test)]
    pub(crate) async fn count(pool: &SqlitePool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM user")
            .fetch_one(pool)
            .await
            .expect("count users")
    }
}
