//! Post repository

use crate::domain::entities::{Post, PostDraft};
use scribe_common::RepositoryError;
use sqlx::PgPool;
use uuid::Uuid;

const POST_COLUMNS: &str =
    "id, uuid, title, text, image_url, is_published, created_at, updated_at";

#[derive(Clone)]
pub struct PostRepository {
    pool: PgPool,
}

impl PostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Count every post
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::from_sqlx)
    }

    /// List posts newest first; `limit` of `None` returns the remainder
    pub async fn list(&self, offset: i64, limit: Option<i64>) -> Result<Vec<Post>, RepositoryError> {
        let sql = format!(
            "SELECT {} FROM posts ORDER BY created_at DESC OFFSET $1 LIMIT $2",
            POST_COLUMNS
        );

        sqlx::query_as::<_, Post>(&sql)
            .bind(offset)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(RepositoryError::from_sqlx)
    }

    /// Find post by uuid
    pub async fn get_by_uuid(&self, uuid: Uuid) -> Result<Post, RepositoryError> {
        let sql = format!("SELECT {} FROM posts WHERE uuid = $1", POST_COLUMNS);

        sqlx::query_as::<_, Post>(&sql)
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::from_sqlx)?
            .ok_or(RepositoryError::NotFound)
    }

    /// Insert a new post; a taken uuid yields `AlreadyExists`
    pub async fn create(&self, draft: &PostDraft) -> Result<Post, RepositoryError> {
        let sql = format!(
            r#"
            INSERT INTO posts (uuid, title, text, image_url, is_published, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING {}
            "#,
            POST_COLUMNS
        );

        sqlx::query_as::<_, Post>(&sql)
            .bind(draft.uuid)
            .bind(&draft.title)
            .bind(&draft.text)
            .bind(&draft.image_url)
            .bind(draft.is_published)
            .bind(draft.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::from_sqlx)
    }

    /// Persist the editable fields of an existing post
    pub async fn update(&self, post: &Post) -> Result<Post, RepositoryError> {
        let sql = format!(
            r#"
            UPDATE posts
            SET title = $2, text = $3, image_url = $4, is_published = $5, updated_at = $6
            WHERE uuid = $1
            RETURNING {}
            "#,
            POST_COLUMNS
        );

        sqlx::query_as::<_, Post>(&sql)
            .bind(post.uuid)
            .bind(&post.title)
            .bind(&post.text)
            .bind(&post.image_url)
            .bind(post.is_published)
            .bind(post.updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::from_sqlx)?
            .ok_or(RepositoryError::NotFound)
    }

    /// Delete post by uuid; its comments go with it
    pub async fn delete_by_uuid(&self, uuid: Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM posts WHERE uuid = $1")
            .bind(uuid)
            .execute(&self.pool)
            .await
            .map_err(RepositoryError::from_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
