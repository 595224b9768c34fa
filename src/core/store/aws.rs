//! AWS Secrets Manager store backend.
//!
//! Fetches secrets with `GetSecretValue`. Enabled by the default `aws`
//! feature.
//!
//! Credentials come from the default provider chain (AWS_ACCESS_KEY_ID,
//! profiles, instance roles, ...). When a secret has no configured region
//! the chain's region is used as well.

use async_trait::async_trait;
use aws_sdk_secretsmanager::config::Region;
use aws_sdk_secretsmanager::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_secretsmanager::Client;
use base64::Engine;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, trace};

use super::{SecretPayload, SecretStore, StoreError};

/// AWS Secrets Manager client.
///
/// Keeps one SDK client per region so the configuration chain is only
/// walked once per region and run.
#[derive(Default)]
pub struct AwsSecretsManager {
    clients: Mutex<HashMap<Option<String>, Client>>,
}

impl AwsSecretsManager {
    /// Create a store using the default AWS configuration chain.
    pub fn new() -> Self {
        Self::default()
    }

    async fn client(&self, region: Option<&str>) -> Client {
        let key = region.map(str::to_string);
        let cached = self.clients.lock().ok().and_then(|c| c.get(&key).cloned());
        if let Some(client) = cached {
            return client;
        }

        debug!(region = region.unwrap_or("<default>"), "loading AWS config");
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region.to_string()));
        }
        let client = Client::new(&loader.load().await);

        if let Ok(mut clients) = self.clients.lock() {
            clients.insert(key, client.clone());
        }
        client
    }
}

#[async_trait]
impl SecretStore for AwsSecretsManager {
    async fn fetch(
        &self,
        secret_id: &str,
        region: Option<&str>,
    ) -> Result<SecretPayload, StoreError> {
        trace!(secret_id, "fetching from AWS Secrets Manager");

        let output = self
            .client(region)
            .await
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await
            .map_err(|e| {
                // transport and credential failures carry no service code
                let context = DisplayErrorContext(&e).to_string();
                let service = e.into_service_error();
                let code = service.code().unwrap_or("Unknown").to_string();
                let message = service.message().map(str::to_string).unwrap_or(context);
                StoreError::new(code, message)
            })?;

        let payload = SecretPayload {
            string_value: output.secret_string().map(str::to_string),
            binary_value: output
                .secret_binary()
                .map(|blob| base64::engine::general_purpose::STANDARD.encode(blob.as_ref())),
        };

        trace!(
            secret_id,
            string = payload.string_value.is_some(),
            binary = payload.binary_value.is_some(),
            "fetched from AWS Secrets Manager"
        );
        Ok(payload)
    }

    fn name(&self) -> &'static str {
        "aws-secrets-manager"
    }
}
