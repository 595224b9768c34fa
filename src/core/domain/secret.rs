//! Secret declarations.
//!
//! A declaration mirrors one entry of a `secrets` array. Its target fields
//! are kept as written so the document round-trips; [`SecretDeclaration::delivery`]
//! resolves them into a typed [`Delivery`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::constants::{TARGET_ENV, TARGET_FILE};
use crate::error::MystikoError;

/// One stored secret and where its value(s) go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SecretDeclaration {
    /// Identifier used to fetch the secret from the store.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub envname: Option<String>,
    /// Per-key targets for a JSON key/value secret.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_values: Option<Vec<KeyTarget>>,
}

/// One key inside a compound secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct KeyTarget {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub envname: Option<String>,
}

/// Destination of a single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    Env(&'a str),
    File(&'a Path),
}

impl Target<'_> {
    /// Target literal as written in configuration.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Env(_) => TARGET_ENV,
            Self::File(_) => TARGET_FILE,
        }
    }

    /// Env var name or file path, for display.
    pub fn destination(&self) -> String {
        match self {
            Self::Env(name) => (*name).to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

/// A key of a compound secret paired with its destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDelivery<'a> {
    pub key: &'a str,
    pub target: Target<'a>,
}

/// How a fetched secret is distributed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery<'a> {
    /// The whole value goes to one target.
    Single(Target<'a>),
    /// Each listed key of a JSON object goes to its own target.
    KeyValues(Vec<KeyDelivery<'a>>),
}

impl SecretDeclaration {
    /// Simple declaration writing the whole value to an environment variable.
    pub fn env(name: impl Into<String>, envname: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: Some(TARGET_ENV.to_string()),
            filename: None,
            envname: Some(envname.into()),
            key_values: None,
        }
    }

    /// Simple declaration writing the whole value to a file.
    pub fn file(name: impl Into<String>, filename: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            target: Some(TARGET_FILE.to_string()),
            filename: Some(filename.into()),
            envname: None,
            key_values: None,
        }
    }

    /// Compound declaration distributing individual keys.
    pub fn key_values(name: impl Into<String>, keys: Vec<KeyTarget>) -> Self {
        Self {
            name: name.into(),
            target: None,
            filename: None,
            envname: None,
            key_values: Some(keys),
        }
    }

    /// Resolve the declared target fields.
    ///
    /// # Errors
    ///
    /// Returns `MystikoError::UnsupportedTarget` for a target literal other
    /// than `env`/`file`, or `MystikoError::UnknownTargetShape` when the
    /// fields do not describe exactly one destination.
    pub fn delivery(&self) -> Result<Delivery<'_>, MystikoError> {
        match &self.key_values {
            Some(keys) => {
                if self.target.is_some() || self.filename.is_some() || self.envname.is_some() {
                    return Err(MystikoError::UnknownTargetShape {
                        secret: self.name.clone(),
                        reason: "keyValues cannot be combined with target, filename or envname"
                            .to_string(),
                    });
                }
                keys.iter()
                    .map(|k| {
                        let target = resolve_target(
                            &self.name,
                            k.target.as_deref(),
                            k.filename.as_deref(),
                            k.envname.as_deref(),
                        )?;
                        Ok(KeyDelivery {
                            key: &k.key,
                            target,
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map(Delivery::KeyValues)
            }
            None => resolve_target(
                &self.name,
                self.target.as_deref(),
                self.filename.as_deref(),
                self.envname.as_deref(),
            )
            .map(Delivery::Single),
        }
    }
}

impl KeyTarget {
    /// Key written to an environment variable.
    pub fn env(key: impl Into<String>, envname: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            target: Some(TARGET_ENV.to_string()),
            filename: None,
            envname: Some(envname.into()),
        }
    }

    /// Key written to a file.
    pub fn file(key: impl Into<String>, filename: impl Into<PathBuf>) -> Self {
        Self {
            key: key.into(),
            target: Some(TARGET_FILE.to_string()),
            filename: Some(filename.into()),
            envname: None,
        }
    }
}

fn resolve_target<'a>(
    secret: &str,
    target: Option<&str>,
    filename: Option<&'a Path>,
    envname: Option<&'a str>,
) -> Result<Target<'a>, MystikoError> {
    let shape_error = |reason: &str| MystikoError::UnknownTargetShape {
        secret: secret.to_string(),
        reason: reason.to_string(),
    };

    let inferred = match (filename, envname) {
        (Some(path), None) => Target::File(path),
        (None, Some(name)) => Target::Env(name),
        (Some(_), Some(_)) => return Err(shape_error("both filename and envname are set")),
        (None, None) => return Err(shape_error("missing envname or filename")),
    };

    match target {
        None => Ok(inferred),
        Some(t) if t == inferred.kind() => Ok(inferred),
        Some(t) if t == TARGET_ENV || t == TARGET_FILE => Err(shape_error(&format!(
            "target {} does not match the declared {}",
            t,
            if inferred.kind() == TARGET_FILE {
                "filename"
            } else {
                "envname"
            }
        ))),
        Some(t) => Err(MystikoError::UnsupportedTarget {
            secret: secret.to_string(),
            target: t.to_string(),
        }),
    }
}
