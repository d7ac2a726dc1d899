//! Bitwarden CLI (`bw`) vault.
//!
//! Every call spawns `bw` with `--session <token>` and reads its JSON output.
//! For item lookups anything written to stderr is treated as a failure and
//! surfaced verbatim; `bw` reports "Not found." and ambiguous matches that way.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::{debug, trace};

use super::{Item, Status, Vault};
use crate::core::session::Session;
use crate::error::{Result, VaultError};

/// Vault backed by the `bw` executable.
#[derive(Debug, Clone)]
pub struct BwCli {
    bin: PathBuf,
    session: Session,
}

/// Captured output of one `bw` invocation.
struct BwOutput {
    stdout: String,
    stderr: String,
    success: bool,
}

impl BwCli {
    pub fn new(bin: impl Into<PathBuf>, session: Session) -> Self {
        Self {
            bin: bin.into(),
            session,
        }
    }

    fn run(&self, args: &[&str]) -> Result<BwOutput> {
        trace!(bin = %self.bin.display(), ?args, "invoking bw");

        let output = Command::new(&self.bin)
            .args(args)
            .arg("--session")
            .arg(self.session.expose())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| VaultError::Spawn {
                program: self.bin.display().to_string(),
                source,
            })?;

        Ok(BwOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            success: output.status.success(),
        })
    }
}

impl Vault for BwCli {
    fn status(&self) -> Result<Status> {
        let out = self.run(&["status"])?;

        // bw may print deprecation noise on stderr here; only the exit
        // status and the JSON body matter.
        if !out.success {
            return Err(VaultError::Cli(out.stderr.trim().to_string()).into());
        }

        let status = Status::parse(&out.stdout)?;
        debug!(status = %status.status, "vault status");
        Ok(status)
    }

    fn get_item(&self, search: &[String]) -> Result<Item> {
        let mut args = vec!["get", "item"];
        args.extend(search.iter().map(String::as_str));

        let out = self.run(&args)?;

        if !out.stderr.trim().is_empty() {
            return Err(VaultError::Cli(out.stderr.trim().to_string()).into());
        }
        if !out.success {
            return Err(VaultError::Cli(format!(
                "bw get item {} failed without output",
                search.join(" ")
            ))
            .into());
        }

        let item = Item::parse(&out.stdout)?;
        debug!(
            search = %search.join(" "),
            fields = item.fields.as_ref().map_or(0, Vec::len),
            "fetched item"
        );
        Ok(item)
    }
}
