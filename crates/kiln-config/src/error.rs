//! Error types for environment loading and configuration resolution.

use std::path::PathBuf;

use thiserror::Error;

use crate::delegate::DelegateError;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Environment source errors
    #[error("no environment declarations for mode `{mode}` in {}", dir.display())]
    EnvSourceNotFound { mode: String, dir: PathBuf },

    #[error("failed to parse environment file {}: {message}", path.display())]
    EnvFile { path: PathBuf, message: String },

    #[error("environment prefix cannot be empty, it would expose every variable")]
    EmptyEnvPrefix,

    // Flag coercion errors
    #[error("required flag `{flag}` is missing")]
    MissingFlag { flag: String },

    #[error("invalid value `{value}` for flag `{flag}`: {hint}")]
    InvalidFlag {
        flag: String,
        value: String,
        hint: String,
    },

    #[error("invalid alias pattern `{pattern}`: {message}")]
    InvalidAliasPattern { pattern: String, message: String },

    #[error("failed to read package manifest {}: {message}", path.display())]
    Manifest { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    // Collaborator failures pass through untouched
    #[error(transparent)]
    Delegate(#[from] DelegateError),
}

impl ConfigError {
    /// Name of the flag this error is about, if any.
    pub fn flag(&self) -> Option<&str> {
        match self {
            ConfigError::MissingFlag { flag } | ConfigError::InvalidFlag { flag, .. } => {
                Some(flag.as_str())
            }
            _ => None,
        }
    }
}
