//! bwenv - Bitwarden secret references for .env files.
//!
//! Keep `bwenv://<item-id>/fields/<field-name>` references in `.env` instead
//! of secrets, and resolve them from Bitwarden when running a command.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── preflight     # Session + unlock checks
//! │   ├── run           # Run with resolved secrets
//! │   ├── generate      # Write references for an item
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── reference     # bwenv:// token grammar
//!     ├── env           # .env parsing and appending
//!     ├── vault/        # Vault trait
//!     │   └── bw        # Bitwarden CLI implementation
//!     ├── resolve       # Batched reference resolution
//!     └── generate      # Reference generation
//! ```

pub mod cli;
pub mod core;
pub mod error;
