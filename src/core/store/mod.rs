//! Secret store access.
//!
//! Abstracts retrieval of stored secrets so the distribution engine can
//! run against AWS Secrets Manager or an in-memory store.
//!
//! ## Adding a New Store Backend
//!
//! 1. Implement the `SecretStore` trait
//! 2. Add the implementation in a new file (e.g., `vault.rs`)
//! 3. Feature-gate if it pulls in a cloud SDK
//! 4. Re-export from this module

use async_trait::async_trait;
use thiserror::Error;

mod memory;

#[cfg(feature = "aws")]
pub mod aws;

#[cfg(feature = "aws")]
pub use aws::AwsSecretsManager;
pub use memory::StaticStore;

/// Raw response of a store for one secret.
///
/// Exactly one field is expected to be populated. `binary_value` carries
/// base64 text, as on the Secrets Manager wire format.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretPayload {
    pub string_value: Option<String>,
    pub binary_value: Option<String>,
}

impl SecretPayload {
    /// Payload carrying a string secret.
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            string_value: Some(value.into()),
            binary_value: None,
        }
    }

    /// Payload carrying base64-encoded binary.
    pub fn binary(base64: impl Into<String>) -> Self {
        Self {
            string_value: None,
            binary_value: Some(base64.into()),
        }
    }
}

/// Category of a store failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreErrorKind {
    DecryptionFailure,
    AccessDenied,
    InternalServiceError,
    InvalidParameter,
    InvalidRequest,
    ResourceNotFound,
    ExpiredToken,
    Unknown,
}

impl StoreErrorKind {
    /// Classify a service error code, with or without the `Exception` suffix.
    pub fn from_code(code: &str) -> Self {
        match code.strip_suffix("Exception").unwrap_or(code) {
            "DecryptionFailure" => Self::DecryptionFailure,
            "AccessDenied" => Self::AccessDenied,
            "InternalServiceError" => Self::InternalServiceError,
            "InvalidParameter" => Self::InvalidParameter,
            "InvalidRequest" => Self::InvalidRequest,
            "ResourceNotFound" => Self::ResourceNotFound,
            "ExpiredToken" => Self::ExpiredToken,
            _ => Self::Unknown,
        }
    }

    /// Whether the caller's credentials are the problem.
    pub fn is_credentials(&self) -> bool {
        matches!(self, Self::AccessDenied | Self::ExpiredToken)
    }

    /// Human-readable explanation, `None` for unknown errors.
    pub fn curated_message(&self) -> Option<&'static str> {
        match self {
            Self::DecryptionFailure => Some(
                "Secrets Manager can't decrypt the protected secret text using the provided KMS key",
            ),
            Self::AccessDenied => Some("Access denied to current user"),
            Self::InternalServiceError => Some("An error occurred on the server side"),
            Self::InvalidParameter => Some("You provided an invalid value for a parameter"),
            Self::InvalidRequest => Some(
                "You provided a parameter value that is not valid for the current state of the resource",
            ),
            Self::ResourceNotFound => Some("Requested secret not found"),
            Self::ExpiredToken => Some("Your credentials expired. Please, re-login"),
            Self::Unknown => None,
        }
    }
}

/// A failure reported by a secret store.
///
/// `code` is the store's own identifier (e.g. `ResourceNotFoundException`)
/// and is kept unchanged when the error propagates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct StoreError {
    pub kind: StoreErrorKind,
    pub code: String,
    pub message: String,
}

impl StoreError {
    /// Build an error from the store's code, classifying it.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        let code = code.into();
        Self {
            kind: StoreErrorKind::from_code(&code),
            code,
            message: message.into(),
        }
    }

    /// Log line for a failed fetch of `secret`.
    pub fn describe(&self, secret: &str) -> String {
        match self.kind.curated_message() {
            Some(msg) => format!("{}: {}", msg, secret),
            None => format!("Unknown error [{}]: {}", self.code, secret),
        }
    }
}

/// Secret store trait.
///
/// Implementations fetch one secret by identifier. `region` selects the
/// endpoint; `None` means the backend's default.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Fetch the raw payload of a secret.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` with the backend's error code.
    async fn fetch(&self, secret_id: &str, region: Option<&str>)
        -> Result<SecretPayload, StoreError>;

    /// Backend name for display.
    fn name(&self) -> &'static str;
}
