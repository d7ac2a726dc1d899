//! Secret reference resolution.
//!
//! Turns a parsed .env file into the environment handed to a child process:
//!
//! 1. Collect every `bwenv://` reference, grouped by item.
//! 2. Fetch each distinct item from the vault exactly once.
//! 3. Copy the inherited environment, overlay plain values from the file,
//!    then overlay every resolved secret.
//!
//! Per-key problems (malformed reference, missing or empty field) become
//! [`Warning`]s. A failed item fetch aborts the whole resolution: no
//! environment is produced, so nothing half-populated can reach the child.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use tracing::{debug, trace};
use zeroize::Zeroizing;

use crate::core::env::Env;
use crate::core::reference::{is_reference, SecretRef};
use crate::core::types::{EnvKey, FieldName, ItemId};
use crate::core::vault::{Item, Vault};
use crate::error::{ReferenceError, Result};

/// A recoverable, per-key resolution problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The value starts with `bwenv://` but is not a valid reference.
    Malformed { key: EnvKey, reason: ReferenceError },
    /// The item was fetched but the field is missing or empty.
    Unresolved { key: EnvKey, reference: SecretRef },
}

impl Warning {
    /// The environment key this warning is about.
    pub fn key(&self) -> &str {
        match self {
            Self::Malformed { key, .. } | Self::Unresolved { key, .. } => key,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed { key, reason } => {
                write!(f, "\"{}\" has a malformed secret reference ({})", key, reason)
            }
            Self::Unresolved { key, reference } => write!(
                f,
                "\"{}\" not found in item with ID \"{}\" (needed by {})",
                reference.field, reference.item_id, key
            ),
        }
    }
}

/// Outcome of a successful resolution.
///
/// Secrets are zeroized while the engine holds them, but `env` is a plain
/// map: it is what gets handed to `exec`, which replaces the process image
/// before any destructor could run. `Debug` shows keys only.
#[derive(Clone)]
pub struct Resolution {
    /// Inherited environment overlaid with file values and resolved secrets.
    pub env: BTreeMap<String, String>,
    /// Per-key problems, in the order they were found.
    pub warnings: Vec<Warning>,
    /// Number of vault lookups performed.
    pub lookups: usize,
}

impl fmt::Debug for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolution")
            .field("env", &self.env.keys().collect::<Vec<_>>())
            .field("warnings", &self.warnings)
            .field("lookups", &self.lookups)
            .finish()
    }
}

/// References grouped for batched lookup.
#[derive(Debug, Default)]
struct ResolutionIndex {
    /// item id -> distinct field names requested from it
    fields_by_item: BTreeMap<ItemId, BTreeSet<FieldName>>,
    /// (item id, field) -> env keys that want its value
    fields_to_env_keys: BTreeMap<SecretRef, BTreeSet<EnvKey>>,
}

impl ResolutionIndex {
    fn insert(&mut self, key: &str, reference: SecretRef) {
        self.fields_by_item
            .entry(reference.item_id.clone())
            .or_default()
            .insert(reference.field.clone());
        self.fields_to_env_keys
            .entry(reference)
            .or_default()
            .insert(key.to_string());
    }

    fn is_empty(&self) -> bool {
        self.fields_by_item.is_empty()
    }
}

/// Split env entries into references (indexed) and plain values.
fn index_entries(env: &Env) -> (ResolutionIndex, Vec<(&str, &str)>, Vec<Warning>) {
    let mut index = ResolutionIndex::default();
    let mut plain = Vec::new();
    let mut warnings = Vec::new();

    for (key, value) in env.entries() {
        if !is_reference(value) {
            plain.push((key.as_str(), value.as_str()));
            continue;
        }

        match SecretRef::parse(value) {
            Ok(reference) => index.insert(key, reference),
            Err(reason) => {
                trace!(key = %key, %reason, "malformed reference");
                warnings.push(Warning::Malformed {
                    key: key.clone(),
                    reason,
                });
            }
        }
    }

    (index, plain, warnings)
}

/// Keep the requested, non-empty fields of a fetched item.
///
/// A field name that appears twice keeps its last value.
fn collect_secrets(
    item_id: &str,
    requested: &BTreeSet<FieldName>,
    item: Item,
    secrets: &mut HashMap<SecretRef, Zeroizing<String>>,
) {
    let Some(fields) = item.fields else {
        debug!(item = %item_id, "item has no fields");
        return;
    };

    let mut by_name: HashMap<String, Option<String>> = HashMap::new();
    for field in fields {
        by_name.insert(field.name, field.value);
    }

    for (name, value) in by_name {
        match value {
            Some(v) if !v.is_empty() && requested.contains(&name) => {
                secrets.insert(SecretRef::new(item_id, name), Zeroizing::new(v));
            }
            _ => {}
        }
    }
}

/// Resolve every reference in `env` against `vault`.
///
/// `inherited` is a snapshot of the process environment; it is copied,
/// never modified.
///
/// # Errors
///
/// Returns the vault's error if any item lookup fails. No partial
/// environment is returned in that case.
pub fn resolve<V: Vault + ?Sized>(
    env: &Env,
    inherited: &BTreeMap<String, String>,
    vault: &V,
) -> Result<Resolution> {
    let (index, plain, mut warnings) = index_entries(env);

    debug!(
        entries = env.len(),
        references = index.fields_to_env_keys.len(),
        items = index.fields_by_item.len(),
        malformed = warnings.len(),
        "indexed env file"
    );

    let mut secrets: HashMap<SecretRef, Zeroizing<String>> = HashMap::new();
    let mut lookups = 0;

    if !index.is_empty() {
        for (item_id, requested) in &index.fields_by_item {
            debug!(item = %item_id, fields = requested.len(), "looking up item");
            let item = vault.get_item(std::slice::from_ref(item_id))?;
            lookups += 1;
            collect_secrets(item_id, requested, item, &mut secrets);
        }
    }

    let mut final_env = inherited.clone();

    for (key, value) in plain {
        final_env.insert(key.to_string(), value.to_string());
    }

    for (reference, keys) in &index.fields_to_env_keys {
        for key in keys {
            match secrets.get(reference) {
                Some(value) => {
                    final_env.insert(key.clone(), value.as_str().to_string());
                }
                None => warnings.push(Warning::Unresolved {
                    key: key.clone(),
                    reference: reference.clone(),
                }),
            }
        }
    }

    debug!(
        resolved = secrets.len(),
        lookups,
        warnings = warnings.len(),
        "resolution complete"
    );

    Ok(Resolution {
        env: final_env,
        warnings,
        lookups,
    })
}
