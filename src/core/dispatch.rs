//! Writing resolved secret values to their targets.

use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::core::domain::{render_field, Delivery, SecretValue, Target};
use crate::core::env::EnvSink;
use crate::core::report::Logger;
use crate::error::{MystikoError, Result};

/// Writes secret values to files and environment variables.
pub struct Dispatcher<'a> {
    env: &'a dyn EnvSink,
    logger: &'a dyn Logger,
}

impl<'a> Dispatcher<'a> {
    pub fn new(env: &'a dyn EnvSink, logger: &'a dyn Logger) -> Self {
        Self { env, logger }
    }

    /// Distribute `value` of secret `secret` as described by `delivery`.
    ///
    /// For key/value deliveries every key is looked up before anything is
    /// written, so a missing key leaves no partial output behind.
    ///
    /// # Errors
    ///
    /// Returns `MystikoError::NotKeyValue` if a key/value delivery gets a
    /// value that is not a JSON object, `MystikoError::MissingKey` if a
    /// declared key is absent, or `MystikoError::Write` if a file cannot be
    /// written.
    pub async fn dispatch(
        &self,
        secret: &str,
        delivery: &Delivery<'_>,
        value: &SecretValue,
    ) -> Result<()> {
        match delivery {
            Delivery::Single(target) => self.write(secret, target, value.as_text()).await,
            Delivery::KeyValues(keys) => {
                let map = value.as_object().ok_or_else(|| MystikoError::NotKeyValue {
                    secret: secret.to_string(),
                })?;

                let writes = keys
                    .iter()
                    .map(|k| {
                        map.get(k.key)
                            .map(|field| (k.key, &k.target, render_field(field)))
                            .ok_or_else(|| MystikoError::MissingKey {
                                key: k.key.to_string(),
                                secret: secret.to_string(),
                            })
                    })
                    .collect::<std::result::Result<Vec<_>, _>>()?;

                for (key, target, text) in writes {
                    self.write(key, target, &text).await?;
                }
                Ok(())
            }
        }
    }

    async fn write(&self, name: &str, target: &Target<'_>, value: &str) -> Result<()> {
        match target {
            Target::File(path) => {
                self.logger
                    .log(&format!("Saving {} into file {}", name, path.display()));
                write_file(path, value).await
            }
            Target::Env(var) => {
                self.logger
                    .log(&format!("Saving {} into environment variable {}", name, var));
                self.env.set(var, value);
                Ok(())
            }
        }
    }
}

/// Write `contents` to `path`, creating parent directories.
///
/// Existing files are truncated; new files are created with mode 0600 on Unix.
pub async fn write_file(path: &Path, contents: &str) -> Result<()> {
    let write_error = |source| MystikoError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(write_error)?;
    }

    let mut options = tokio::fs::OpenOptions::new();
    options.create(true).truncate(true).write(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await.map_err(write_error)?;
    file.write_all(contents.as_bytes())
        .await
        .map_err(write_error)?;
    file.flush().await.map_err(write_error)?;

    debug!(path = %path.display(), len = contents.len(), "secret file written");
    Ok(())
}
