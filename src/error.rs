//! Error types.
//!
//! One crate-level [`Error`] wraps a dedicated enum per concern so callers
//! can match on the failing stage with [`Error::kind`].

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::payload::PayloadError;
use crate::core::store::{StoreError, StoreErrorKind};

/// Crate-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Policy(#[from] MystikoError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Discriminant of [`Error`] for programmatic matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    SchemaValidation,
    Config,
    Policy,
    Store(StoreErrorKind),
    Io,
    Other,
}

impl Error {
    /// Which stage produced this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Schema(_) => ErrorKind::SchemaValidation,
            Self::Config(_) => ErrorKind::Config,
            Self::Policy(_) => ErrorKind::Policy,
            Self::Store(e) => ErrorKind::Store(e.kind),
            Self::Io(_) => ErrorKind::Io,
            Self::Other(_) => ErrorKind::Other,
        }
    }
}

/// A single structural problem found in the configuration document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON pointer to the offending value (empty for the document root).
    pub path: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() { "/" } else { &self.path };
        write!(f, "{}: {}", path, self.message)
    }
}

/// The configuration document does not match the expected structure.
///
/// Carries every violation found, not only the first one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", summarize(.violations))]
pub struct SchemaValidationError {
    pub violations: Vec<Violation>,
}

fn summarize(violations: &[Violation]) -> String {
    let mut out = format!(
        "schema validation failed with {} error{}",
        violations.len(),
        if violations.len() == 1 { "" } else { "s" }
    );
    for violation in violations {
        out.push_str("\n  ");
        out.push_str(&violation.to_string());
    }
    out
}

/// Configuration loading and environment selection errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("environment '{name}' is not defined (available: {})", .available.join(", "))]
    UnknownEnvironment {
        name: String,
        available: Vec<String>,
    },

    #[error("failed to read {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Runtime policy violations while distributing a secret.
#[derive(Error, Debug)]
pub enum MystikoError {
    #[error(
        "secret {secret} is not processed, because its target {target} is not supported. Supported: {}",
        crate::core::constants::TARGETS.join(",")
    )]
    UnsupportedTarget { secret: String, target: String },

    #[error("unknown type of target in {secret}: {reason}")]
    UnknownTargetShape { secret: String, reason: String },

    #[error("{key} is not a key in the secret {secret}")]
    MissingKey { key: String, secret: String },

    #[error("secret {secret} declares keyValues but its value is not a JSON object")]
    NotKeyValue { secret: String },

    #[error("secret {secret} has an unreadable payload: {source}")]
    Payload {
        secret: String,
        #[source]
        source: PayloadError,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
