//! Constants used throughout bwenv.
//!
//! Centralizes magic strings and configuration values.

/// Prefix marking an env value as a secret reference.
pub const REFERENCE_PREFIX: &str = "bwenv://";

/// Separator between the item id and the field name in a reference.
pub const FIELDS_SEPARATOR: &str = "/fields/";

/// Default environment file name (.env).
pub const ENV_FILE: &str = ".env";

/// Environment variable holding the Bitwarden session token.
pub const SESSION_ENV: &str = "BW_SESSION";

/// Environment variable overriding the path to the `bw` binary.
pub const BW_BIN_ENV: &str = "BWENV_BW_BIN";

/// Name of the Bitwarden CLI binary searched on PATH.
pub const BW_BIN: &str = "bw";

/// Environment variable controlling the log filter.
pub const LOG_ENV: &str = "BWENV_LOG";

/// Vault status reported by `bw status` when the session is usable.
pub const STATUS_UNLOCKED: &str = "unlocked";
