//! Run command.
//!
//! Materializes an environment's secrets (files on disk, env vars captured
//! in memory), then executes a command with the captured variables injected.

use std::path::Path;
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::env::MemoryEnv;
use crate::error::{Error, Result};

/// Materialize secrets and run `command`, exiting with its status.
pub fn execute(environment: &str, config: &Path, command: &[String]) -> Result<()> {
    if command.is_empty() {
        return Err(Error::Other(
            "no command specified (usage: mystiko run <ENV> -- <COMMAND>...)".to_string(),
        ));
    }

    let env = MemoryEnv::new();
    materialize(environment, config, &env)?;

    let exit_code = run_with_env(env, command)?;
    std::process::exit(exit_code);
}

#[cfg(feature = "aws")]
fn materialize(environment: &str, config: &Path, env: &MemoryEnv) -> Result<()> {
    use crate::cli::output::Console;
    use crate::core::orchestrator::Mystiko;

    let store = crate::core::store::AwsSecretsManager::new();
    let engine = Mystiko::new(&store, env, &Console);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    rt.block_on(engine.run(environment, config))
}

#[cfg(not(feature = "aws"))]
fn materialize(_environment: &str, _config: &Path, _env: &MemoryEnv) -> Result<()> {
    Err(Error::Other(
        "mystiko was built without a secret store backend (enable the `aws` feature)".to_string(),
    ))
}

/// Spawn `command` with the captured variables added to its environment.
fn run_with_env(env: MemoryEnv, command: &[String]) -> Result<i32> {
    let mut cmd = std::process::Command::new(&command[0]);
    cmd.args(&command[1..]);

    // Zeroizing wipes each value once it has been handed to the child
    let vars = env.into_vars();
    debug!(vars = vars.len(), program = %command[0], "spawning command");
    for (key, value) in vars {
        let value = Zeroizing::new(value);
        cmd.env(key, value.as_str());
    }

    let status = cmd.status()?;
    Ok(status.code().unwrap_or(1))
}
