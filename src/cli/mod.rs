//! Command-line interface.

pub mod completions;
pub mod generate;
pub mod output;
pub mod preflight;
pub mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::constants::{ENV_FILE, SESSION_ENV};

/// bwenv - Bitwarden secret references for .env files.
#[derive(Parser)]
#[command(
    name = "bwenv",
    about = "Securely use and share environment variables in local development using Bitwarden",
    version
)]
pub struct Cli {
    /// Bitwarden session token (from `bw unlock`)
    #[arg(long, global = true, env = SESSION_ENV, hide_env_values = true)]
    pub session: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Run a command with bwenv:// references resolved into its environment
    Run {
        /// Name of env file
        #[arg(short = 'f', long = "env-file", default_value = ENV_FILE)]
        env_file: PathBuf,
        /// Command and arguments to run
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Append bwenv:// references for every field of a Bitwarden item
    Generate {
        /// Name of env file
        #[arg(short = 'f', long = "env-file", default_value = ENV_FILE)]
        env_file: PathBuf,
        /// Bitwarden item id, or a fuzzy search for the item name
        #[arg(required = true)]
        name: Vec<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
}

/// Execute a command.
pub fn execute(command: Command, session: Option<String>) -> crate::error::Result<()> {
    use Command::*;

    match command {
        Run { env_file, command } => {
            let vault = preflight::unlocked_vault(session)?;
            run::execute(&vault, &env_file, &command)
        }
        Generate { env_file, name } => {
            let vault = preflight::unlocked_vault(session)?;
            generate::execute(&vault, &env_file, &name)
        }
        Completions { shell } => completions::execute(shell),
    }
}
