//! Generate command.
//!
//! Appends `bwenv://` references for one Bitwarden item to an env file.

use std::path::Path;

use crate::cli::output;
use crate::core::generate;
use crate::core::vault::Vault;
use crate::error::Result;

/// Look up `name` and append its references to `env_file`.
pub fn execute<V: Vault + ?Sized>(vault: &V, env_file: &Path, name: &[String]) -> Result<()> {
    let generated = generate::generate(name, vault, env_file)?;

    for warning in &generated.name_warnings {
        output::warn(&warning.to_string());
    }

    output::success(&format!(
        "Added {} environment variables to {}",
        generated.lines.len(),
        output::path(&env_file.display().to_string())
    ));
    Ok(())
}
