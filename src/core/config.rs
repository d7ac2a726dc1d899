//! Runtime configuration.
//!
//! bwenv keeps no config file; everything comes from flags and the
//! environment. This module owns the parts the CLI flags don't cover.

use std::ffi::OsString;
use std::path::PathBuf;

use tracing::debug;

use crate::core::constants::{BW_BIN, BW_BIN_ENV};
use crate::error::{ConfigError, Result};

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the Bitwarden CLI executable.
    pub bw_bin: PathBuf,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// `BWENV_BW_BIN` overrides the `bw` binary; otherwise it is searched
    /// on `PATH`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::BinaryNotFound` if no executable can be found.
    pub fn from_env() -> Result<Self> {
        let bw_bin = locate_bw(std::env::var_os(BW_BIN_ENV))?;
        debug!(bw = %bw_bin.display(), "config loaded");
        Ok(Self { bw_bin })
    }
}

/// Locate the `bw` executable, preferring an explicit override.
pub fn locate_bw(override_path: Option<OsString>) -> Result<PathBuf> {
    match override_path.filter(|p| !p.is_empty()) {
        Some(path) => which::which(&path).map_err(|e| {
            ConfigError::BinaryNotFound(format!(
                "{} (from {}): {}",
                PathBuf::from(&path).display(),
                BW_BIN_ENV,
                e
            ))
            .into()
        }),
        None => which::which(BW_BIN).map_err(|_| {
            ConfigError::BinaryNotFound(format!(
                "'{}' is not on PATH (install the Bitwarden CLI or set {})",
                BW_BIN, BW_BIN_ENV
            ))
            .into()
        }),
    }
}
