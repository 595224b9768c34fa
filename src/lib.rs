//! Mystiko - materialize stored secrets into files and environment variables.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── run           # Materialize secrets, then exec a command
//! │   ├── check         # Validate configuration
//! │   ├── plan          # Show resolved secret targets
//! │   ├── completions   # Shell completions
//! │   └── output        # Terminal output helpers
//! └── core/             # Core library components
//!     ├── domain/       # Configuration document and value types
//!     ├── schema        # Structural validation of .mystiko.json
//!     ├── resolve       # Environment selection and defaults merge
//!     ├── payload       # Secret payload parsing
//!     ├── dispatch      # File / env var writes
//!     ├── orchestrator  # Concurrent fetch → parse → dispatch
//!     ├── store/        # Secret store trait and backends
//!     ├── env           # Env var sinks
//!     └── report        # User-facing logger trait
//! ```
//!
//! # Example
//!
//! ```no_run
//! # async fn example() -> mystiko::error::Result<()> {
//! use mystiko::core::env::MemoryEnv;
//! use mystiko::core::report::Silent;
//! use mystiko::core::store::StaticStore;
//! use mystiko::Mystiko;
//!
//! let store = StaticStore::new().with_string("db/password", "hunter2");
//! let env = MemoryEnv::new();
//! Mystiko::new(&store, &env, &Silent).run("dev", ".mystiko.json").await?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod core;
pub mod error;

pub use crate::core::domain::{ConfigDocument, EnvironmentConfig, SecretDeclaration};
pub use crate::core::orchestrator::Mystiko;
pub use crate::core::payload::parse_secret_payload;
pub use crate::core::resolve::resolve_config;
pub use crate::core::schema::validate;

/// Materialize secrets with the default collaborators.
///
/// Uses AWS Secrets Manager, the process environment and console output.
/// `config_file` defaults to `.mystiko.json` in the working directory.
///
/// # Errors
///
/// See [`Mystiko::run`].
#[cfg(feature = "aws")]
pub async fn run(environment: &str, config_file: Option<&std::path::Path>) -> error::Result<()> {
    let store = crate::core::store::AwsSecretsManager::new();
    let config_file =
        config_file.unwrap_or_else(|| std::path::Path::new(crate::core::constants::CONFIG_FILE));
    Mystiko::new(&store, &crate::core::env::ProcessEnv, &cli::output::Console)
        .run(environment, config_file)
        .await
}
