//! Constants used throughout mystiko.
//!
//! Centralizes magic strings and configuration values.

/// Configuration file name (.mystiko.json).
pub const CONFIG_FILE: &str = ".mystiko.json";

/// Environment variable overriding the configuration file path.
pub const CONFIG_ENV: &str = "MYSTIKO_CONFIG";

/// Environment variable selecting the environment name.
pub const ENVIRONMENT_ENV: &str = "MYSTIKO_ENV";

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV: &str = "MYSTIKO_LOG";

/// Prefix of every user-facing console line.
pub const LOG_PREFIX: &str = "MYSTIKO:";

/// Target literal for environment variables.
pub const TARGET_ENV: &str = "env";

/// Target literal for files.
pub const TARGET_FILE: &str = "file";

/// Supported target literals.
pub const TARGETS: &[&str] = &[TARGET_FILE, TARGET_ENV];
