//! Dev-server and production build policy.

mod build;
mod css;
mod server;

use std::fmt;

use serde::Serialize;

pub use build::{
    BuildPolicy, CHUNK_SIZE_WARNING_LIMIT_KB, CSS_TARGET, DROP_PRAGMAS, JS_TARGET, OUTPUT_DIR,
    dead_code_pragmas,
};
pub use css::{CssOptions, LessOptions, PreprocessorOptions};
pub use server::ServerPolicy;

/// How the host bundler was invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    /// Production build
    Build,
    /// Development server
    Serve,
}

impl Command {
    pub fn is_build(self) -> bool {
        matches!(self, Command::Build)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Command::Build => "build",
            Command::Serve => "serve",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
