//! Plan command.
//!
//! Prints the resolved secrets of an environment and where each value
//! would be written, without contacting the secret store.

use std::path::Path;

use crate::cli::output;
use crate::core::domain::{ConfigDocument, Delivery, Target};
use crate::core::resolve::resolve_config;
use crate::error::{Error, Result};

/// Show the resolved plan for `environment`.
pub fn execute(environment: &str, config: &Path, json: bool) -> Result<()> {
    let document = ConfigDocument::load(config)?;
    let resolved = resolve_config(environment, &document)?;

    if json {
        let rendered = serde_json::to_string_pretty(&resolved)
            .map_err(|e| Error::Other(format!("failed to render plan: {}", e)))?;
        println!("{}", rendered);
        return Ok(());
    }

    output::section(&format!("Environment {}", environment));
    output::kv("region", resolved.region.as_deref().unwrap_or("(default)"));
    output::kv("secrets", resolved.secrets.len());
    println!();

    for secret in &resolved.secrets {
        match secret.delivery()? {
            Delivery::Single(target) => {
                println!("  {} → {}", secret.name, describe(&target));
            }
            Delivery::KeyValues(keys) => {
                println!("  {}", secret.name);
                for k in &keys {
                    println!("    .{} → {}", k.key, describe(&k.target));
                }
            }
        }
    }
    Ok(())
}

fn describe(target: &Target<'_>) -> String {
    format!("{} {}", target.kind(), output::target(&target.destination()))
}
