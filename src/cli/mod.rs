//! Command-line interface.

pub mod check;
pub mod completions;
pub mod output;
pub mod plan;
pub mod run;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::constants::{CONFIG_ENV, CONFIG_FILE, ENVIRONMENT_ENV};

/// Mystiko - materialize stored secrets into files and environment variables.
#[derive(Parser)]
#[command(
    name = "mystiko",
    about = "Materialize stored secrets into files and environment variables",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Location of the configuration file, shared by every command.
#[derive(clap::Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Path to the configuration file
    #[arg(short, long, env = CONFIG_ENV, default_value = CONFIG_FILE)]
    pub config: PathBuf,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Materialize an environment's secrets, then run a command with them
    Run {
        /// Environment name as declared in the configuration
        #[arg(env = ENVIRONMENT_ENV)]
        environment: String,
        #[command(flatten)]
        config: ConfigArgs,
        /// Command and arguments to run
        #[arg(last = true)]
        command: Vec<String>,
    },

    /// Validate the configuration file without fetching secrets
    Check {
        /// Also resolve this environment
        environment: Option<String>,
        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Show where each secret of an environment would be written
    Plan {
        /// Environment name as declared in the configuration
        #[arg(env = ENVIRONMENT_ENV)]
        environment: String,
        #[command(flatten)]
        config: ConfigArgs,
        /// Print the resolved environment as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Execute a command.
pub fn execute(command: Command) -> crate::error::Result<()> {
    use Command::*;

    match command {
        Run {
            environment,
            config,
            command,
        } => run::execute(&environment, &config.config, &command),
        Check {
            environment,
            config,
        } => check::execute(environment.as_deref(), &config.config),
        Plan {
            environment,
            config,
            json,
        } => plan::execute(&environment, &config.config, json),
        Completions { shell } => completions::execute(shell),
    }
}
