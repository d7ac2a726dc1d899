//! Error types.
//!
//! Each concern gets its own enum; [`Error`] wraps them so commands can
//! propagate everything with `?`.

use thiserror::Error;

/// Configuration and pre-flight errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "no Bitwarden session token was provided (use --session or the BW_SESSION environment variable)"
    )]
    MissingSession,

    #[error("invalid Bitwarden session token: vault is {status}")]
    VaultLocked { status: String },

    #[error("Bitwarden CLI not found: {0}")]
    BinaryNotFound(String),

    #[error("no command specified")]
    NoCommand,
}

/// Errors reported by, or while talking to, the vault collaborator.
#[derive(Error, Debug)]
pub enum VaultError {
    /// The vault tool wrote to its error channel. Carries the raw text.
    #[error("Bitwarden CLI error -- {0}")]
    Cli(String),

    #[error("failed to execute {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse Bitwarden CLI {what} response: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Bitwarden CLI response is missing the item id")]
    MissingId,

    #[error(
        "\"fields\" property missing from Bitwarden CLI response. Matched item with ID \"{id}\" does not have any environment variables configured"
    )]
    NoFields { id: String },
}

/// Malformed `bwenv://` reference tokens.
///
/// Never fatal: carried inside resolution warnings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    #[error("missing bwenv:// prefix")]
    MissingPrefix,

    #[error("missing /fields/ separator")]
    MissingSeparator,

    #[error("/fields/ separator appears more than once")]
    TooManySeparators,

    #[error("empty item id")]
    EmptyItemId,

    #[error("empty field name")]
    EmptyFieldName,
}

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Vault(#[from] VaultError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to execute '{program}': {source}")]
    Exec {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
