//! Secret reference tokens.
//!
//! A reference points at one custom field of one Bitwarden item:
//!
//! ```text
//! bwenv://<item-id>/fields/<field-name>
//! ```
//!
//! Both parts must be non-empty and not whitespace-only, and the
//! `/fields/` separator must appear exactly once.

use std::fmt;

use crate::core::constants::{FIELDS_SEPARATOR, REFERENCE_PREFIX};
use crate::core::types::{FieldName, ItemId};
use crate::error::ReferenceError;

/// A parsed `bwenv://` reference.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SecretRef {
    pub item_id: ItemId,
    pub field: FieldName,
}

impl SecretRef {
    pub fn new(item_id: impl Into<ItemId>, field: impl Into<FieldName>) -> Self {
        Self {
            item_id: item_id.into(),
            field: field.into(),
        }
    }

    /// Parse a reference token.
    ///
    /// # Errors
    ///
    /// Returns `ReferenceError` if the value does not carry the prefix or
    /// violates the token grammar.
    pub fn parse(value: &str) -> Result<Self, ReferenceError> {
        let rest = value
            .strip_prefix(REFERENCE_PREFIX)
            .ok_or(ReferenceError::MissingPrefix)?;

        let (item_id, field) = rest
            .split_once(FIELDS_SEPARATOR)
            .ok_or(ReferenceError::MissingSeparator)?;

        if field.contains(FIELDS_SEPARATOR) {
            return Err(ReferenceError::TooManySeparators);
        }
        if is_blank(item_id) {
            return Err(ReferenceError::EmptyItemId);
        }
        if is_blank(field) {
            return Err(ReferenceError::EmptyFieldName);
        }

        Ok(Self::new(item_id, field))
    }
}

impl fmt::Display for SecretRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            REFERENCE_PREFIX, self.item_id, FIELDS_SEPARATOR, self.field
        )
    }
}

/// Whether an env value is meant to be a reference (well-formed or not).
pub fn is_reference(value: &str) -> bool {
    value.starts_with(REFERENCE_PREFIX)
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
