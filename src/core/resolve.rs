//! Environment selection and defaults merging.

use tracing::debug;

use crate::core::domain::{ConfigDocument, Defaults, EnvironmentConfig, SecretDeclaration};
use crate::error::ConfigError;

/// Resolve the configuration of one environment.
///
/// The resolved secret list is the environment's own secrets followed by
/// the defaults' secrets. Default-sourced names receive `secretNamePrefix`
/// unless they contain one of the `ignoreSecretNamePrefix` substrings. The
/// region is the environment's own, falling back to the defaults' region.
///
/// The returned config is an independent copy; `document` is not modified,
/// so resolving several environments never applies a prefix twice.
///
/// # Errors
///
/// Returns `ConfigError::UnknownEnvironment` if `environment` is not declared.
pub fn resolve_config(
    environment: &str,
    document: &ConfigDocument,
) -> Result<EnvironmentConfig, ConfigError> {
    let own = document
        .environments
        .get(environment)
        .ok_or_else(|| ConfigError::UnknownEnvironment {
            name: environment.to_string(),
            available: document.environment_names(),
        })?;

    let mut resolved = own.clone();

    if let Some(defaults) = &document.defaults {
        resolved
            .secrets
            .extend(defaults.secrets.iter().map(|s| prefixed(s, defaults)));
        if resolved.region.is_none() {
            resolved.region.clone_from(&defaults.region);
        }
    }

    debug!(
        environment,
        secrets = resolved.secrets.len(),
        region = resolved.region.as_deref().unwrap_or("<default>"),
        "environment resolved"
    );
    Ok(resolved)
}

fn prefixed(secret: &SecretDeclaration, defaults: &Defaults) -> SecretDeclaration {
    let mut secret = secret.clone();
    secret.name = prefixed_name(
        &secret.name,
        defaults.secret_name_prefix.as_deref(),
        &defaults.ignore_secret_name_prefix,
    );
    secret
}

/// Apply `prefix` to `name` unless `name` contains any `ignore` substring.
pub fn prefixed_name(name: &str, prefix: Option<&str>, ignore: &[String]) -> String {
    match prefix {
        Some(prefix) if !prefix.is_empty() && !ignore.iter().any(|i| name.contains(i.as_str())) => {
            format!("{}{}", prefix, name)
        }
        _ => name.to_string(),
    }
}
