//! Bitwarden session credential.

use std::fmt;

use zeroize::Zeroizing;

use crate::error::{ConfigError, Result};

/// A `bw unlock` session token, wiped from memory on drop.
#[derive(Clone)]
pub struct Session(Zeroizing<String>);

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Zeroizing::new(token.into()))
    }

    /// Build a session from the CLI flag (already merged with `BW_SESSION`).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingSession` if no non-blank token was given.
    pub fn from_arg(token: Option<String>) -> Result<Self> {
        match token {
            Some(t) if !t.trim().is_empty() => Ok(Self::new(t)),
            _ => Err(ConfigError::MissingSession.into()),
        }
    }

    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Session(<redacted>)")
    }
}
