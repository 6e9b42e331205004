use sqlx::SqlitePool;

use crate::{
    errors::ApiError,
    models::{Post, PostWithAuthor},
};

pub struct PostRepo;

impl PostRepo {
    /// All posts, newest first, each with its author's username.
    ///
    /// `id DESC` breaks ties so insertion order stays stable within one
    /// timestamp granule.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<PostWithAuthor>, ApiError> {
        sqlx::query_as::<_, PostWithAuthor>(
            r"
            SELECT p.id, p.author_id, p.title, p.body, p.created_at, u.username
            FROM post p JOIN user u ON p.author_id = u.id
            ORDER BY p.created_at DESC, p.id DESC
            ",
        )
        .fetch_all(pool)
        .await
        .map_err(ApiError::Store)
    }

    pub async fn get(pool: &SqlitePool, id: i64) -> Result<Option<Post>, ApiError> {
        sqlx::query_as::<_, Post>(
            "SELECT id, author_id, title, body, created_at FROM post WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(ApiError::Store)
    }

    /// Inserts a post and returns its id; `created_at` is set by the store.
    pub async fn create(
        pool: &SqlitePool,
        author_id: i64,
        title: &str,
        body: &str,
    ) -> Result<i64, ApiError> {
        let result = sqlx::query("INSERT INTO post (author_id, title, body) VALUES (?1, ?2, ?3)")
            .bind(author_id)
            .bind(title)
            .bind(body)
            .execute(pool)
            .await
            .map_err(ApiError::Store)?;

        Ok(result.last_insert_rowid())
    }

    /// Returns `false` when no post with `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        title: &str,
        body: &str,
    ) -> Result<bool, ApiError> {
        let result = sqlx::query("UPDATE post SET title = ?1, body = ?2 WHERE id = ?3")
            .bind(title)
            .bind(body)
            .bind(id)
            .execute(pool)
            .await
            .map_err(ApiError::Store)?;

        Ok(result.rows_affected() > 0)
    }

    /// Returns `false` when no post with `id` exists.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM post WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(ApiError::Store)?;

        Ok(result.rows_affected() > 0)
    }
}
