//! In-memory identity directory for tests
//!
//! Counts every lookup so tests can assert how many directory calls an
//! operation made, and can be switched into a failing mode.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use scribe_common::RepositoryError;
use uuid::Uuid;

use crate::directory::{AdminDirectory, VisitorDirectory};
use crate::types::{AdminAccount, VisitorIdentity};

#[derive(Debug, Default)]
struct Calls {
    find_admin: usize,
    find_admin_by_uuid: usize,
    find_visitor: usize,
    visitor_comment_uuids: usize,
}

/// In-memory admin and visitor directory
#[derive(Clone, Default)]
pub struct MockDirectory {
    admins: Arc<Mutex<Vec<AdminAccount>>>,
    visitors: Arc<Mutex<Vec<VisitorIdentity>>>,
    comments: Arc<Mutex<HashMap<Uuid, Vec<Uuid>>>>,
    calls: Arc<Mutex<Calls>>,
    failing: Arc<Mutex<bool>>,
}

impl MockDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_admin(self, account: AdminAccount) -> Self {
        self.admins.lock().unwrap().push(account);
        self
    }

    pub fn with_visitor(self, visitor: VisitorIdentity) -> Self {
        self.visitors.lock().unwrap().push(visitor);
        self
    }

    /// Record `comment_uuid` as authored by `visitor_uuid`
    pub fn with_comment(self, visitor_uuid: Uuid, comment_uuid: Uuid) -> Self {
        self.comments
            .lock()
            .unwrap()
            .entry(visitor_uuid)
            .or_default()
            .push(comment_uuid);
        self
    }

    /// Make every lookup fail with a connection-style error
    pub fn failing(self) -> Self {
        *self.failing.lock().unwrap() = true;
        self
    }

    pub fn admin_lookups(&self) -> usize {
        let calls = self.calls.lock().unwrap();
        calls.find_admin + calls.find_admin_by_uuid
    }

    pub fn visitor_lookups(&self) -> usize {
        self.calls.lock().unwrap().find_visitor
    }

    pub fn ownership_lookups(&self) -> usize {
        self.calls.lock().unwrap().visitor_comment_uuids
    }

    pub fn total_calls(&self) -> usize {
        let calls = self.calls.lock().unwrap();
        calls.find_admin + calls.find_admin_by_uuid + calls.find_visitor + calls.visitor_comment_uuids
    }

    fn check_failing(&self) -> Result<(), RepositoryError> {
        if *self.failing.lock().unwrap() {
            Err(RepositoryError::InvalidData(
                "mock directory unavailable".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

#[async_trait::async_trait]
impl AdminDirectory for MockDirectory {
    async fn find_admin(&self, username: &str) -> Result<Option<AdminAccount>, RepositoryError> {
        self.calls.lock().unwrap().find_admin += 1;
        self.check_failing()?;
        Ok(self
            .admins
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn find_admin_by_uuid(
        &self,
        uuid: Uuid,
    ) -> Result<Option<AdminAccount>, RepositoryError> {
        self.calls.lock().unwrap().find_admin_by_uuid += 1;
        self.check_failing()?;
        Ok(self
            .admins
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.uuid == uuid)
            .cloned())
    }
}

#[async_trait::async_trait]
impl VisitorDirectory for MockDirectory {
    async fn find_visitor(
        &self,
        username: &str,
    ) -> Result<Option<VisitorIdentity>, RepositoryError> {
        self.calls.lock().unwrap().find_visitor += 1;
        self.check_failing()?;
        Ok(self
            .visitors
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.username == username)
            .cloned())
    }

    async fn visitor_comment_uuids(
        &self,
        visitor_uuid: Uuid,
    ) -> Result<Vec<Uuid>, RepositoryError> {
        self.calls.lock().unwrap().visitor_comment_uuids += 1;
        self.check_failing()?;

        let known = self
            .visitors
            .lock()
            .unwrap()
            .iter()
            .any(|v| v.uuid == visitor_uuid);
        if !known {
            return Err(RepositoryError::NotFound);
        }

        Ok(self
            .comments
            .lock()
            .unwrap()
            .get(&visitor_uuid)
            .cloned()
            .unwrap_or_default())
    }
}
