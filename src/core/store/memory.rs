//! In-memory secret store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::trace;

use super::{SecretPayload, SecretStore, StoreError};

/// Store answering from a fixed table.
///
/// Unknown identifiers fail with `ResourceNotFoundException`. Every request
/// is recorded so callers can check what was fetched.
#[derive(Debug, Default)]
pub struct StaticStore {
    entries: HashMap<String, Result<SecretPayload, StoreError>>,
    requests: Mutex<Vec<(String, Option<String>)>>,
}

impl StaticStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a string secret.
    pub fn with_string(mut self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries
            .insert(id.into(), Ok(SecretPayload::string(value)));
        self
    }

    /// Add a payload as-is.
    pub fn with_payload(mut self, id: impl Into<String>, payload: SecretPayload) -> Self {
        self.entries.insert(id.into(), Ok(payload));
        self
    }

    /// Make fetching `id` fail.
    pub fn with_error(mut self, id: impl Into<String>, error: StoreError) -> Self {
        self.entries.insert(id.into(), Err(error));
        self
    }

    /// Identifiers and regions requested so far, in request order.
    pub fn requests(&self) -> Vec<(String, Option<String>)> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl SecretStore for StaticStore {
    async fn fetch(
        &self,
        secret_id: &str,
        region: Option<&str>,
    ) -> Result<SecretPayload, StoreError> {
        trace!(secret_id, region, "static store fetch");
        if let Ok(mut requests) = self.requests.lock() {
            requests.push((secret_id.to_string(), region.map(str::to_string)));
        }

        match self.entries.get(secret_id) {
            Some(entry) => entry.clone(),
            None => Err(StoreError::new(
                "ResourceNotFoundException",
                format!("Secrets Manager can't find the specified secret: {}", secret_id),
            )),
        }
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
