//! Vault collaborator.
//!
//! The vault is an opaque external tool. bwenv only needs two operations
//! from it, captured by the [`Vault`] trait:
//!
//! - `status`: is the session usable?
//! - `get_item`: fetch one item by id or search terms.
//!
//! ## Implementations
//!
//! - [`BwCli`]: shells out to the Bitwarden CLI (`bw`).
//! - Tests use in-memory stubs.

mod bw;

pub use bw::BwCli;

use serde::Deserialize;

use crate::core::constants::STATUS_UNLOCKED;
use crate::error::{Result, VaultError};

/// Narrow interface to the external vault tool.
pub trait Vault {
    /// Report the lock state of the vault for the current session.
    ///
    /// # Errors
    ///
    /// Returns `VaultError` if the tool cannot be run or its output is invalid.
    fn status(&self) -> Result<Status>;

    /// Fetch exactly one item.
    ///
    /// `search` is either a single item id or fuzzy search terms, passed to
    /// the tool as separate arguments.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::Cli` carrying the tool's raw error text when it
    /// reports a failure (not found, ambiguous match, ...).
    fn get_item(&self, search: &[String]) -> Result<Item>;
}

/// Response of `bw status`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Status {
    pub status: String,
}

impl Status {
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|source| VaultError::Parse {
                what: "status",
                source,
            })
            .map_err(Into::into)
    }

    pub fn is_unlocked(&self) -> bool {
        self.status == STATUS_UNLOCKED
    }
}

/// A fetched vault item.
///
/// `fields` is `None` when the item has no custom fields configured at all.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Item {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub fields: Option<Vec<Field>>,
}

/// A custom field on an item.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Field {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }
}

impl Item {
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|source| VaultError::Parse {
                what: "item",
                source,
            })
            .map_err(Into::into)
    }

    /// Build an item with the given fields.
    pub fn with_fields(id: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            id: Some(id.into()),
            name: None,
            fields: Some(fields),
        }
    }
}
