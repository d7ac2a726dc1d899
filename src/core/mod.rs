//! Core library components.
//!
//! Reference parsing, .env handling, the vault interface, and the
//! resolution and generation engines. Nothing here prints to the terminal.

pub mod config;
pub mod constants;
pub mod env;
pub mod generate;
pub mod reference;
pub mod resolve;
pub mod session;
pub mod types;
pub mod vault;
