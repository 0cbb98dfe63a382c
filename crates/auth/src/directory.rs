//! Identity lookups needed by authentication and authorization
//!
//! Implemented over Postgres by [`crate::PgDirectory`] and in memory by
//! [`crate::mock::MockDirectory`].

use scribe_common::RepositoryError;
use uuid::Uuid;

use crate::types::{AdminAccount, VisitorIdentity};

/// Admin account lookups used by password login
#[async_trait::async_trait]
pub trait AdminDirectory: Send + Sync {
    async fn find_admin(&self, username: &str) -> Result<Option<AdminAccount>, RepositoryError>;

    async fn find_admin_by_uuid(&self, uuid: Uuid)
        -> Result<Option<AdminAccount>, RepositoryError>;
}

/// Visitor lookups used by OAuth resolution and comment ownership checks
#[async_trait::async_trait]
pub trait VisitorDirectory: Send + Sync {
    async fn find_visitor(&self, username: &str)
        -> Result<Option<VisitorIdentity>, RepositoryError>;

    /// Comment uuids authored by the visitor. `NotFound` if no such visitor.
    async fn visitor_comment_uuids(&self, visitor_uuid: Uuid)
        -> Result<Vec<Uuid>, RepositoryError>;
}
