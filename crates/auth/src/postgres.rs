//! Postgres identity directory
//!
//! Uses runtime `sqlx::query_as` (not macros) over the `users`, `visitors`
//! and `comments` tables owned by the blog domain.

use scribe_common::RepositoryError;
use sqlx::PgPool;
use uuid::Uuid;

use crate::directory::{AdminDirectory, VisitorDirectory};
use crate::types::{AdminAccount, VisitorIdentity};

/// Identity lookups backed by a Postgres pool
#[derive(Clone)]
pub struct PgDirectory {
    pool: PgPool,
}

impl PgDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl AdminDirectory for PgDirectory {
    async fn find_admin(&self, username: &str) -> Result<Option<AdminAccount>, RepositoryError> {
        sqlx::query_as::<_, AdminAccount>(
            "SELECT uuid, username, password, is_admin FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, username = %username, "Failed to load admin account");
            RepositoryError::from_sqlx(e)
        })
    }

    async fn find_admin_by_uuid(
        &self,
        uuid: Uuid,
    ) -> Result<Option<AdminAccount>, RepositoryError> {
        sqlx::query_as::<_, AdminAccount>(
            "SELECT uuid, username, password, is_admin FROM users WHERE uuid = $1",
        )
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_uuid = %uuid, "Failed to load admin account");
            RepositoryError::from_sqlx(e)
        })
    }
}

#[async_trait::async_trait]
impl VisitorDirectory for PgDirectory {
    async fn find_visitor(
        &self,
        username: &str,
    ) -> Result<Option<VisitorIdentity>, RepositoryError> {
        sqlx::query_as::<_, VisitorIdentity>(
            "SELECT uuid, username, avatar_url FROM visitors WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, username = %username, "Failed to load visitor");
            RepositoryError::from_sqlx(e)
        })
    }

    async fn visitor_comment_uuids(
        &self,
        visitor_uuid: Uuid,
    ) -> Result<Vec<Uuid>, RepositoryError> {
        let visitor_id: Option<(i32,)> = sqlx::query_as("SELECT id FROM visitors WHERE uuid = $1")
            .bind(visitor_uuid)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::from_sqlx)?;

        let (visitor_id,) = visitor_id.ok_or(RepositoryError::NotFound)?;

        let rows: Vec<(Uuid,)> =
            sqlx::query_as("SELECT uuid FROM comments WHERE visitor_id = $1 ORDER BY created_at")
                .bind(visitor_id)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, visitor_uuid = %visitor_uuid, "Failed to load visitor comments");
                    RepositoryError::from_sqlx(e)
                })?;

        Ok(rows.into_iter().map(|(uuid,)| uuid).collect())
    }
}
