//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

/// An opaque Bitwarden item identifier (usually a UUID).
pub type ItemId = String;

/// The name of a custom field inside a Bitwarden item.
pub type FieldName = String;

/// An environment variable name (e.g., DATABASE_URL).
pub type EnvKey = String;
