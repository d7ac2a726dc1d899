//! Pre-flight checks shared by `run` and `generate`.
//!
//! Both commands need a session token and an unlocked vault before any
//! secret is touched.

use tracing::debug;

use crate::core::config::Config;
use crate::core::session::Session;
use crate::core::vault::{BwCli, Vault};
use crate::error::{ConfigError, Result};

/// Build the `bw` vault for this invocation and make sure it is unlocked.
///
/// # Errors
///
/// Returns `ConfigError::MissingSession` before anything is spawned if no
/// token was given, `ConfigError::BinaryNotFound` if `bw` cannot be located,
/// and `ConfigError::VaultLocked` if the session is not usable.
pub fn unlocked_vault(session: Option<String>) -> Result<BwCli> {
    let session = Session::from_arg(session)?;
    let config = Config::from_env()?;

    let vault = BwCli::new(config.bw_bin, session);
    ensure_unlocked(&vault)?;

    Ok(vault)
}

/// Fail unless the vault reports itself as unlocked.
pub fn ensure_unlocked<V: Vault + ?Sized>(vault: &V) -> Result<()> {
    let status = vault.status()?;

    if !status.is_unlocked() {
        return Err(ConfigError::VaultLocked {
            status: status.status,
        }
        .into());
    }

    debug!("vault unlocked");
    Ok(())
}
