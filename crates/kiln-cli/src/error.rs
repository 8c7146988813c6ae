//! Error handling for the Kiln CLI.
//!
//! Library errors are wrapped with a help line pointing at the file or flag to
//! fix; `main` renders them through miette.

use std::path::PathBuf;

use kiln_config::ConfigError;
use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    /// Resolution failed inside the library
    #[error("{source}")]
    #[diagnostic(code(kiln::config))]
    Config {
        #[source]
        source: ConfigError,
        #[help]
        help: Option<String>,
    },

    /// kiln.toml or KILN_* variables could not be read
    #[error("invalid kiln settings: {0}")]
    #[diagnostic(
        code(kiln::settings),
        help("Check kiln.toml syntax and KILN_* environment variables")
    )]
    Settings(String),

    /// --config points at a missing file
    #[error("settings file not found: {}", .0.display())]
    #[diagnostic(code(kiln::settings_not_found))]
    SettingsNotFound(PathBuf),

    /// No alias rule matched the specifier
    #[error("no alias rule matches `{0}`")]
    #[diagnostic(code(kiln::alias::no_match))]
    NoAliasMatch(String),

    #[error("JSON error: {0}")]
    #[diagnostic(code(kiln::json))]
    Json(#[from] serde_json::Error),
}

impl From<ConfigError> for CliError {
    fn from(source: ConfigError) -> Self {
        let help = hint_for(&source);
        CliError::Config { source, help }
    }
}

fn hint_for(err: &ConfigError) -> Option<String> {
    match err {
        ConfigError::MissingFlag { flag } => Some(format!(
            "Declare {flag} in .env.<mode>, the dev server has no default"
        )),
        ConfigError::InvalidFlag { flag, .. } => {
            Some(format!("Fix the value of {flag} in your .env files"))
        }
        ConfigError::EnvSourceNotFound { mode, .. } => Some(format!(
            "Create .env.{mode} or pass --mode with an existing mode"
        )),
        ConfigError::EmptyEnvPrefix => {
            Some("Set env_prefixes in kiln.toml to a non-empty prefix such as VITE_".to_string())
        }
        ConfigError::Manifest { .. } => {
            Some("Run kiln from the project root or pass --root".to_string())
        }
        _ => None,
    }
}
