//! In-memory object store for tests and local development

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::{ObjectStore, StorageConfig, StorageError};

/// Object captured by the mock store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub body: Vec<u8>,
    pub content_type: String,
}

/// In-memory object store
#[derive(Debug, Clone)]
pub struct MockObjectStore {
    objects: Arc<Mutex<HashMap<String, StoredObject>>>,
    config: StorageConfig,
    failing: bool,
}

impl MockObjectStore {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            objects: Arc::new(Mutex::new(HashMap::new())),
            config,
            failing: false,
        }
    }

    /// Create a store whose every upload fails
    pub fn new_failing(config: StorageConfig) -> Self {
        Self {
            failing: true,
            ..Self::new(config)
        }
    }

    pub fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

impl Default for MockObjectStore {
    fn default() -> Self {
        Self::new(StorageConfig::default())
    }
}

#[async_trait::async_trait]
impl ObjectStore for MockObjectStore {
    async fn put_public(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        if self.failing {
            return Err(StorageError::Upload("mock upload failure".to_string()));
        }

        tracing::debug!(key = %key, bytes = body.len(), "Mock store capturing object");
        self.objects.lock().unwrap().insert(
            key.to_string(),
            StoredObject {
                body,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        self.config.public_url(key)
    }
}
