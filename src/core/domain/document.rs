//! Configuration document types.
//!
//! Represents a parsed `.mystiko.json` file.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use super::SecretDeclaration;
use crate::core::schema;
use crate::error::{ConfigError, Result};

/// Root of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigDocument {
    /// Secrets and naming rules shared by every environment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<Defaults>,
    /// Per-environment configuration keyed by environment name
    pub environments: BTreeMap<String, EnvironmentConfig>,
}

/// Configuration of a single environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EnvironmentConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub secrets: Vec<SecretDeclaration>,
}

/// Shared defaults merged into every environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Defaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_name_prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore_secret_name_prefix: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default)]
    pub secrets: Vec<SecretDeclaration>,
}

impl ConfigDocument {
    /// Load and validate a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` if the file cannot be read,
    /// `ConfigError::Parse` if it is not JSON, or `SchemaValidationError`
    /// if the structure is wrong.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading config");

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, path)
    }

    /// Parse and validate configuration text; `origin` is only used in errors.
    pub fn parse(contents: &str, origin: impl AsRef<Path>) -> Result<Self> {
        let parse_error = |source| ConfigError::Parse {
            path: origin.as_ref().to_path_buf(),
            source,
        };

        let value: Value = serde_json::from_str(contents).map_err(parse_error)?;
        schema::validate(&value)?;
        let document: Self = serde_json::from_value(value).map_err(parse_error)?;

        debug!(
            environments = document.environments.len(),
            defaults = document.defaults.as_ref().map_or(0, |d| d.secrets.len()),
            "config loaded"
        );
        Ok(document)
    }

    /// Names of all declared environments, sorted.
    pub fn environment_names(&self) -> Vec<String> {
        self.environments.keys().cloned().collect()
    }
}
