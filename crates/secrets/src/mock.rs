//! In-memory secret provider
//!
//! Serves fixed bundles for tests and local development, and records every
//! lookup so tests can assert how often secrets were fetched.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::{SecretBundle, SecretError, SecretProvider};

/// In-memory secret provider
#[derive(Debug, Clone, Default)]
pub struct MockSecretProvider {
    bundles: Arc<Mutex<HashMap<String, SecretBundle>>>,
    failures: Arc<Mutex<HashMap<String, SecretError>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockSecretProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a JSON object of `{ secretName: { key: value } }`
    pub fn from_json(raw: &str) -> Result<Self, SecretError> {
        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| SecretError::Configuration(e.to_string()))?;
        let object = value.as_object().ok_or_else(|| {
            SecretError::Configuration("static secrets must be a JSON object".to_string())
        })?;

        let provider = Self::new();
        for (name, bundle) in object {
            let bundle = SecretBundle::from_json(name, &bundle.to_string())?;
            provider.insert_bundle(bundle);
        }
        Ok(provider)
    }

    /// Register a bundle under `name` from key/value pairs
    pub fn with_secret(self, name: &str, entries: &[(&str, &str)]) -> Self {
        let values = entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.insert_bundle(SecretBundle::new(name, values));
        self
    }

    /// Make every lookup of `name` fail with `error`
    pub fn with_failure(self, name: &str, error: SecretError) -> Self {
        self.failures.lock().unwrap().insert(name.to_string(), error);
        self
    }

    fn insert_bundle(&self, bundle: SecretBundle) {
        self.bundles
            .lock()
            .unwrap()
            .insert(bundle.name().to_string(), bundle);
    }

    /// Names requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of lookups for a given secret name
    pub fn request_count(&self, name: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.as_str() == name)
            .count()
    }

    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }
}

#[async_trait::async_trait]
impl SecretProvider for MockSecretProvider {
    async fn get_secret(&self, name: &str) -> Result<SecretBundle, SecretError> {
        self.requests.lock().unwrap().push(name.to_string());

        if let Some(error) = self.failures.lock().unwrap().get(name) {
            return Err(error.clone());
        }

        // Unknown names behave like the swallowed store failures: empty bundle
        Ok(self
            .bundles
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .unwrap_or_else(|| SecretBundle::empty(name)))
    }
}
