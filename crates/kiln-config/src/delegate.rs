//! Collaborator boundaries the resolver hands work to.
//!
//! The resolver never looks inside what these return: the plugin list is
//! embedded as-is and the style variables are forwarded verbatim to the
//! pre-processor options.

use std::error::Error as StdError;

use indexmap::IndexMap;
use thiserror::Error;

use crate::flags::TypedFlags;
use crate::plugins::PluginSpec;

/// Failure raised inside a delegate.
#[derive(Debug, Error)]
#[error("{delegate}: {message}")]
pub struct DelegateError {
    pub delegate: String,
    pub message: String,
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl DelegateError {
    pub fn new(delegate: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            delegate: delegate.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Attach the underlying cause.
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

/// Builds the ordered bundler plugin list.
pub trait PluginAssembler {
    /// `is_build` is true for a production build and false for the dev server.
    fn assemble(
        &self,
        flags: &TypedFlags,
        is_build: bool,
    ) -> Result<Vec<PluginSpec>, DelegateError>;
}

/// Produces the variables injected into the CSS pre-processor.
pub trait StyleVariables {
    fn generate(&self) -> Result<IndexMap<String, String>, DelegateError>;
}
