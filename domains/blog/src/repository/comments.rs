//! Comment repository

use crate::domain::entities::{Comment, CommentDraft, CommentRow};
use scribe_common::RepositoryError;
use sqlx::PgPool;
use uuid::Uuid;

const COMMENT_SELECT: &str = r#"
    SELECT c.uuid, c.text, c.created_at, c.updated_at,
           p.uuid AS post_uuid,
           v.uuid AS visitor_uuid,
           v.username AS visitor_username,
           v.avatar_url AS visitor_avatar_url
    FROM comments c
    INNER JOIN posts p ON p.id = c.post_id
    INNER JOIN visitors v ON v.id = c.visitor_id
"#;

#[derive(Clone)]
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List comments on a post oldest first with their authors
    pub async fn list_for_post(&self, post_uuid: Uuid) -> Result<Vec<Comment>, RepositoryError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM posts WHERE uuid = $1)",
        )
        .bind(post_uuid)
        .fetch_one(&self.pool)
        .await
        .map_err(RepositoryError::from_sqlx)?;

        if !exists {
            return Err(RepositoryError::NotFound);
        }

        let sql = format!("{} WHERE p.uuid = $1 ORDER BY c.created_at ASC", COMMENT_SELECT);
        let rows = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(post_uuid)
            .fetch_all(&self.pool)
            .await
            .map_err(RepositoryError::from_sqlx)?;

        Ok(rows.into_iter().map(Comment::from).collect())
    }

    /// Attach a comment to a post on behalf of a visitor.
    ///
    /// `NotFound` when either the post or the visitor is missing.
    pub async fn create(
        &self,
        post_uuid: Uuid,
        visitor_uuid: Uuid,
        draft: &CommentDraft,
    ) -> Result<Comment, RepositoryError> {
        let inserted = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO comments (uuid, text, created_at, updated_at, post_id, visitor_id)
            SELECT $1, $2, $3, $3, p.id, v.id
            FROM posts p, visitors v
            WHERE p.uuid = $4 AND v.uuid = $5
            RETURNING uuid
            "#,
        )
        .bind(draft.uuid)
        .bind(&draft.text)
        .bind(draft.created_at)
        .bind(post_uuid)
        .bind(visitor_uuid)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from_sqlx)?
        .ok_or(RepositoryError::NotFound)?;

        self.get_by_uuid(inserted).await
    }

    /// Find comment by uuid
    pub async fn get_by_uuid(&self, uuid: Uuid) -> Result<Comment, RepositoryError> {
        let sql = format!("{} WHERE c.uuid = $1", COMMENT_SELECT);
        sqlx::query_as::<_, CommentRow>(&sql)
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::from_sqlx)?
            .map(Comment::from)
            .ok_or(RepositoryError::NotFound)
    }

    /// Delete a comment that belongs to the given post
    pub async fn delete(&self, post_uuid: Uuid, comment_uuid: Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            DELETE FROM comments c
            USING posts p
            WHERE c.post_id = p.id AND p.uuid = $1 AND c.uuid = $2
            "#,
        )
        .bind(post_uuid)
        .bind(comment_uuid)
        .execute(&self.pool)
        .await
        .map_err(RepositoryError::from_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
