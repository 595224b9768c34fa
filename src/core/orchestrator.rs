//! End-to-end secret distribution.
//!
//! Loads and validates the configuration, resolves one environment, then
//! fetches, parses and dispatches every declared secret concurrently.
//!
//! Secrets are independent: there is no ordering between them, and a
//! failing secret does not stop its siblings. Once all have settled the
//! first failure in declaration order is returned.

use futures::future::join_all;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info_span, Instrument};

use crate::core::dispatch::Dispatcher;
use crate::core::domain::{ConfigDocument, Delivery, EnvironmentConfig, SecretDeclaration, Target};
use crate::core::env::EnvSink;
use crate::core::payload::parse_secret_payload;
use crate::core::report::Logger;
use crate::core::resolve::resolve_config;
use crate::core::store::SecretStore;
use crate::error::{ConfigError, Error, MystikoError, Result};

/// The distribution engine with its collaborators.
pub struct Mystiko<'a> {
    store: &'a dyn SecretStore,
    env: &'a dyn EnvSink,
    logger: &'a dyn Logger,
}

impl<'a> Mystiko<'a> {
    pub fn new(store: &'a dyn SecretStore, env: &'a dyn EnvSink, logger: &'a dyn Logger) -> Self {
        Self { store, env, logger }
    }

    /// Materialize the secrets of `environment` declared in `config_file`.
    ///
    /// # Errors
    ///
    /// Fails before fetching anything on unreadable or invalid configuration
    /// and on an unknown environment; otherwise returns the first
    /// per-secret failure.
    pub async fn run(&self, environment: &str, config_file: impl AsRef<Path>) -> Result<()> {
        let path = config_file.as_ref();
        debug!(path = %path.display(), "loading config");
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::ReadFile {
                path: path.to_path_buf(),
                source,
            })?;
        let document = ConfigDocument::parse(&contents, path)?;
        let config = resolve_config(environment, &document)?;
        self.apply(&config).await
    }

    /// Materialize the secrets of an already resolved environment.
    ///
    /// # Errors
    ///
    /// Returns the first per-secret failure after all secrets settled.
    pub async fn apply(&self, config: &EnvironmentConfig) -> Result<()> {
        self.warn_duplicate_targets(config);

        let region = config.region.as_deref();
        let tasks = config.secrets.iter().map(|secret| {
            let span = info_span!("secret", name = %secret.name);
            self.process(secret, region).instrument(span)
        });
        let results = join_all(tasks).await;

        debug!(
            total = results.len(),
            failed = results.iter().filter(|r| r.is_err()).count(),
            "all secrets settled"
        );
        results.into_iter().collect::<Result<Vec<()>>>().map(drop)
    }

    async fn process(&self, secret: &SecretDeclaration, region: Option<&str>) -> Result<()> {
        let result = self.try_process(secret, region).await;
        if let Err(err) = &result {
            // store failures are already reported with their curated message
            if !matches!(err, Error::Store(_)) {
                self.logger.error(&err.to_string());
            }
        }
        result
    }

    async fn try_process(&self, secret: &SecretDeclaration, region: Option<&str>) -> Result<()> {
        let delivery = secret.delivery()?;

        let payload = match self.store.fetch(&secret.name, region).await {
            Ok(payload) => payload,
            Err(err) => {
                self.logger
                    .error(&format!("{}\n{}", err.describe(&secret.name), err));
                return Err(err.into());
            }
        };
        debug!(store = self.store.name(), "secret fetched");

        let value = parse_secret_payload(payload).map_err(|source| MystikoError::Payload {
            secret: secret.name.clone(),
            source,
        })?;

        if value.as_text().is_empty() {
            self.logger
                .warn(&format!("Secret {} is empty, nothing written", secret.name));
            return Ok(());
        }

        Dispatcher::new(self.env, self.logger)
            .dispatch(&secret.name, &delivery, &value)
            .await
    }

    /// Report env vars and files that more than one secret writes to.
    fn warn_duplicate_targets(&self, config: &EnvironmentConfig) {
        let mut seen: HashMap<(&'static str, String), usize> = HashMap::new();
        for secret in &config.secrets {
            match secret.delivery() {
                Ok(Delivery::Single(target)) => count_target(&mut seen, &target),
                Ok(Delivery::KeyValues(keys)) => {
                    for k in &keys {
                        count_target(&mut seen, &k.target);
                    }
                }
                Err(_) => {}
            }
        }

        let mut duplicates: Vec<_> = seen.into_iter().filter(|(_, n)| *n > 1).collect();
        duplicates.sort();
        for ((kind, destination), count) in duplicates {
            self.logger.warn(&format!(
                "{} target {} is written by {} declarations; the final value is unpredictable",
                kind, destination, count
            ));
        }
    }
}

fn count_target(seen: &mut HashMap<(&'static str, String), usize>, target: &Target<'_>) {
    *seen.entry((target.kind(), target.destination())).or_default() += 1;
}
