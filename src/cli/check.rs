//! Check command.
//!
//! Validates the configuration file and, optionally, resolves one
//! environment. Nothing is fetched or written.

use std::path::Path;

use crate::cli::output;
use crate::core::domain::ConfigDocument;
use crate::core::resolve::resolve_config;
use crate::error::Result;

/// Validate `config`, resolving `environment` when given.
pub fn execute(environment: Option<&str>, config: &Path) -> Result<()> {
    let document = ConfigDocument::load(config)?;

    match environment {
        Some(name) => {
            let resolved = resolve_config(name, &document)?;
            for secret in &resolved.secrets {
                secret.delivery()?;
            }
            output::success(&format!(
                "{} is valid; environment {} resolves to {} secret{}",
                config.display(),
                name,
                resolved.secrets.len(),
                if resolved.secrets.len() == 1 { "" } else { "s" }
            ));
        }
        None => {
            output::success(&format!(
                "{} is valid ({} environment{}: {})",
                config.display(),
                document.environments.len(),
                if document.environments.len() == 1 { "" } else { "s" },
                document.environment_names().join(", ")
            ));
        }
    }
    Ok(())
}
