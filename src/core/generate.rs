//! Reference generation.
//!
//! The reverse of resolution: look up one vault item and append a line per
//! custom field to an .env file, each value a `bwenv://` reference rather
//! than the secret itself.

use std::fmt;
use std::path::Path;

use tracing::debug;

use crate::core::constants::FIELDS_SEPARATOR;
use crate::core::env;
use crate::core::reference::SecretRef;
use crate::core::vault::{Item, Vault};
use crate::error::{Result, VaultError};

/// Outcome of a successful generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    /// Id of the matched item.
    pub item_id: String,
    /// Lines appended to the file, without trailing newlines.
    pub lines: Vec<String>,
    /// Field names that make poor env keys. Their lines are written anyway.
    pub name_warnings: Vec<NameWarning>,
}

/// What is wrong with a field name used as an env key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameProblem {
    /// The generated line does not read back as this key, so `run` will
    /// never resolve it.
    Unreadable(&'static str),
    /// Reads back fine, but is not a portable shell variable name.
    NotPortable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameWarning {
    pub name: String,
    pub problem: NameProblem,
}

impl fmt::Display for NameWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.problem {
            NameProblem::Unreadable(reason) => write!(
                f,
                "field {:?} {}; its line will not resolve on run",
                self.name, reason
            ),
            NameProblem::NotPortable => write!(
                f,
                "field {:?} is not a portable environment variable name",
                self.name
            ),
        }
    }
}

/// Check a field name against how .env lines are read back.
fn check_field_name(name: &str) -> Option<NameProblem> {
    let unreadable = if name.trim().is_empty() {
        Some("is empty")
    } else if name.trim() != name {
        Some("has leading or trailing whitespace")
    } else if name.contains(['\n', '\r']) {
        Some("contains a line break")
    } else if name.contains('=') {
        Some("contains '='")
    } else if name.starts_with('#') {
        Some("starts with '#'")
    } else if name.starts_with("export ") {
        Some("starts with 'export '")
    } else if name.contains(FIELDS_SEPARATOR) {
        Some("contains '/fields/'")
    } else {
        None
    };

    if let Some(reason) = unreadable {
        return Some(NameProblem::Unreadable(reason));
    }

    let portable = !name.starts_with(|c: char| c.is_ascii_digit())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    (!portable).then_some(NameProblem::NotPortable)
}

/// Escape a reference for a double-quoted .env value.
fn quote_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        if matches!(ch, '"' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

/// Render the .env lines for an item, in vault field order.
///
/// # Errors
///
/// Returns `VaultError::MissingId` if the response carries no id, or
/// `VaultError::NoFields` if the item has no fields collection.
pub fn reference_lines(item: &Item) -> Result<Generated> {
    let item_id = item.id.clone().ok_or(VaultError::MissingId)?;

    let fields = item.fields.as_ref().ok_or_else(|| VaultError::NoFields {
        id: item_id.clone(),
    })?;

    let mut lines = Vec::with_capacity(fields.len());
    let mut name_warnings = Vec::new();

    for field in fields {
        if let Some(problem) = check_field_name(&field.name) {
            name_warnings.push(NameWarning {
                name: field.name.clone(),
                problem,
            });
        }
        let reference = SecretRef::new(item_id.as_str(), field.name.as_str());
        lines.push(format!("{}={}", field.name, quote_value(&reference.to_string())));
    }

    Ok(Generated {
        item_id,
        lines,
        name_warnings,
    })
}

/// Look up `search` and append its reference lines to `path`.
///
/// Nothing is written unless the lookup succeeds and the item has fields.
///
/// # Errors
///
/// Returns the vault's error verbatim (not found and ambiguous matches
/// included), `VaultError::NoFields` for an item without fields, or an
/// I/O error if the file cannot be written.
pub fn generate<V: Vault + ?Sized>(search: &[String], vault: &V, path: &Path) -> Result<Generated> {
    let item = vault.get_item(search)?;
    let generated = reference_lines(&item)?;

    env::append_lines(path, &generated.lines)?;

    debug!(
        item = %generated.item_id,
        name = item.name.as_deref().unwrap_or("<unnamed>"),
        lines = generated.lines.len(),
        path = %path.display(),
        "generated references"
    );
    Ok(generated)
}
