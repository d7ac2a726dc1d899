//! Run command.
//!
//! Resolves the references in an env file and hands the process over to
//! the requested command with the resulting environment.

use std::collections::BTreeMap;
use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::cli::output;
use crate::core::env::Env;
use crate::core::resolve::{self, Resolution};
use crate::core::vault::Vault;
use crate::error::{ConfigError, Error, Result};

/// Resolve `env_file` and exec `command` with the result.
///
/// Only returns on failure; on success the current process is replaced
/// (or, without `exec`, exits with the child's status).
pub fn execute<V: Vault + ?Sized>(vault: &V, env_file: &Path, command: &[String]) -> Result<()> {
    let resolution = prepare(vault, env_file, command)?;
    exec(command, &resolution.env)
}

/// Everything `run` does short of starting the child.
///
/// Warnings are printed as they are returned by the resolver.
pub fn prepare<V: Vault + ?Sized>(
    vault: &V,
    env_file: &Path,
    command: &[String],
) -> Result<Resolution> {
    if command.is_empty() {
        return Err(ConfigError::NoCommand.into());
    }

    let env = load_env(env_file)?;
    let inherited = snapshot_env();
    let resolution = resolve::resolve(&env, &inherited, vault)?;

    for warning in &resolution.warnings {
        output::warn(&warning.to_string());
    }

    Ok(resolution)
}

/// Load the env file, treating a missing file as empty.
fn load_env(path: &Path) -> Result<Env> {
    match Env::load(path) {
        Ok(env) => Ok(env),
        Err(Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            output::warn(&format!(
                "{} not found, running without references",
                path.display()
            ));
            Ok(Env::from_pairs(Vec::new(), path.to_path_buf()))
        }
        Err(e) => Err(e),
    }
}

/// Snapshot the current process environment.
///
/// Variables that are not valid Unicode are left out of the snapshot; the
/// child still inherits them because the command environment is only
/// overlaid, never cleared.
fn snapshot_env() -> BTreeMap<String, String> {
    std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect()
}

fn build_command(command: &[String], env: &BTreeMap<String, String>) -> Command {
    let mut cmd = Command::new(&command[0]);
    cmd.args(&command[1..]);
    cmd.envs(env);
    cmd
}

#[cfg(unix)]
fn exec(command: &[String], env: &BTreeMap<String, String>) -> Result<()> {
    use std::os::unix::process::CommandExt;

    debug!(program = %command[0], args = command.len() - 1, "exec");
    let source = build_command(command, env).exec();

    Err(Error::Exec {
        program: command[0].clone(),
        source,
    })
}

#[cfg(not(unix))]
fn exec(command: &[String], env: &BTreeMap<String, String>) -> Result<()> {
    debug!(program = %command[0], args = command.len() - 1, "spawn");
    let status = build_command(command, env)
        .status()
        .map_err(|source| Error::Exec {
            program: command[0].clone(),
            source,
        })?;

    std::process::exit(status.code().unwrap_or(1));
}
