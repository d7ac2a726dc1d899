//! Env type.
//!
//! Represents a parsed .env file with typed access, plus the append-only
//! writer used when generating reference lines.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::types::EnvKey;
use crate::error::Result;

/// A parsed .env file
#[derive(Debug, Clone)]
pub struct Env {
    entries: Vec<(EnvKey, String)>,
    path: PathBuf,
}

impl Env {
    /// Parse an .env file from disk
    ///
    /// Skips empty lines and comments (lines starting with #).
    /// Supports values with or without quotes and an optional `export ` prefix.
    /// A key that appears twice keeps its first position and its last value.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let env = Self::parse(&contents, path);
        debug!(path = %path.display(), entries = env.len(), "env file loaded");
        Ok(env)
    }

    /// Parse .env contents that did not come from disk.
    pub fn parse(contents: &str, path: impl Into<PathBuf>) -> Self {
        let mut env = Self {
            entries: Vec::new(),
            path: path.into(),
        };

        for line in contents.lines() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let line = line.strip_prefix("export ").unwrap_or(line);

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                if key.is_empty() {
                    continue;
                }
                env.insert(key.to_string(), parse_env_value(value.trim()));
            }
        }

        env
    }

    /// Create from raw key-value pairs
    pub fn from_pairs(pairs: Vec<(EnvKey, String)>, path: PathBuf) -> Self {
        let mut env = Self {
            entries: Vec::with_capacity(pairs.len()),
            path,
        };
        for (key, value) in pairs {
            env.insert(key, value);
        }
        env
    }

    fn insert(&mut self, key: EnvKey, value: String) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All entries as key-value pairs, in file order
    pub fn entries(&self) -> &[(EnvKey, String)] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// File path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Append lines to an .env file, creating it if needed.
///
/// Existing content is preserved. If the file does not end with a newline,
/// one is written first so the new lines never merge into the last entry.
/// New files are created with 0600 permissions on Unix.
///
/// # Errors
///
/// Returns error if the file cannot be opened or written.
pub fn append_lines(path: &Path, lines: &[String]) -> Result<()> {
    let needs_newline = match std::fs::read(path) {
        Ok(existing) => existing.last().is_some_and(|b| *b != b'\n'),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
        Err(e) => return Err(e.into()),
    };

    let mut options = std::fs::OpenOptions::new();
    options.create(true).append(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;

    let mut content = String::new();
    if needs_newline {
        content.push('\n');
    }
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }

    file.write_all(content.as_bytes())?;
    file.flush()?;

    debug!(path = %path.display(), lines = lines.len(), "appended to env file");
    Ok(())
}

fn parse_env_value(raw: &str) -> String {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        return unescape_double_quoted(&raw[1..raw.len() - 1]);
    }

    if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
        return raw[1..raw.len() - 1].to_string();
    }

    raw.to_string()
}

fn unescape_double_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}
