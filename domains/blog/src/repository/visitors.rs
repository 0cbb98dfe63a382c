//! Visitor repository

use crate::domain::entities::{Visitor, VisitorProfile};
use scribe_common::RepositoryError;
use sqlx::PgPool;
use uuid::Uuid;

const VISITOR_COLUMNS: &str = "id, uuid, username, avatar_url, created_at, updated_at";

#[derive(Clone)]
pub struct VisitorRepository {
    pool: PgPool,
}

impl VisitorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn count(&self) -> Result<i64, RepositoryError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM visitors")
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::from_sqlx)
    }

    /// List visitors newest first
    pub async fn list(
        &self,
        offset: i64,
        limit: Option<i64>,
    ) -> Result<Vec<Visitor>, RepositoryError> {
        let sql = format!(
            "SELECT {} FROM visitors ORDER BY created_at DESC OFFSET $1 LIMIT $2",
            VISITOR_COLUMNS
        );

        sqlx::query_as::<_, Visitor>(&sql)
            .bind(offset)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(RepositoryError::from_sqlx)
    }

    pub async fn get_by_uuid(&self, uuid: Uuid) -> Result<Visitor, RepositoryError> {
        let sql = format!("SELECT {} FROM visitors WHERE uuid = $1", VISITOR_COLUMNS);

        sqlx::query_as::<_, Visitor>(&sql)
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::from_sqlx)?
            .ok_or(RepositoryError::NotFound)
    }

    /// Return the visitor for this login, creating it on first sight.
    ///
    /// Keyed on username so concurrent first logins that minted different
    /// uuids still converge on one row; the avatar is refreshed each time.
    pub async fn get_or_create(&self, profile: &VisitorProfile) -> Result<Visitor, RepositoryError> {
        let sql = format!(
            r#"
            INSERT INTO visitors (uuid, username, avatar_url)
            VALUES ($1, $2, $3)
            ON CONFLICT (username)
            DO UPDATE SET avatar_url = EXCLUDED.avatar_url, updated_at = NOW()
            RETURNING {}
            "#,
            VISITOR_COLUMNS
        );

        let visitor = sqlx::query_as::<_, Visitor>(&sql)
            .bind(profile.uuid)
            .bind(&profile.username)
            .bind(&profile.avatar_url)
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::from_sqlx)?;

        if visitor.uuid != profile.uuid {
            tracing::debug!(
                username = %visitor.username,
                stored_uuid = %visitor.uuid,
                "Visitor already known under another uuid"
            );
        }

        Ok(visitor)
    }

    pub async fn delete_by_uuid(&self, uuid: Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM visitors WHERE uuid = $1")
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
