//! Kiln CLI - resolves front-end bundler configuration from `.env` files.
//!
//! The binary is a thin shell around [`kiln_config::Resolver`]: it locates the
//! project, layers its own settings, runs one resolution and prints the result
//! as JSON on stdout. Logs go to stderr so the output can be piped straight
//! into the bundler.
//!
//! - [`cli`] - argument definitions
//! - [`commands`] - command implementations
//! - [`settings`] - `kiln.toml` / `KILN_*` settings
//! - [`error`] - error types with diagnostics
//! - [`logger`] - tracing setup

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod settings;

pub use error::{CliError, Result};
