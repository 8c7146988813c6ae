use std::path::PathBuf;

use serde::Serialize;

use crate::flags::TypedFlags;

/// Directory the production bundle is written to.
pub const OUTPUT_DIR: &str = "dist";

/// Chunk size, in KB, above which the bundler warns.
pub const CHUNK_SIZE_WARNING_LIMIT_KB: u32 = 2000;

pub const JS_TARGET: &str = "es2015";

pub const CSS_TARGET: &str = "chrome80";

/// Call sites removed when console stripping is on.
pub const DROP_PRAGMAS: [&str; 2] = ["console.log", "debugger"];

/// Dead-code-elimination markers for the given stripping decision.
pub fn dead_code_pragmas(console_strip: bool) -> Vec<String> {
    if console_strip {
        DROP_PRAGMAS.iter().map(|pragma| pragma.to_string()).collect()
    } else {
        Vec::new()
    }
}

/// Production build options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildPolicy {
    #[serde(skip)]
    pub public_base_path: String,

    pub target: String,

    pub css_target: String,

    #[serde(rename = "outDir")]
    pub output_directory: PathBuf,

    /// Compressed-size reporting slows packaging; always off
    pub brotli_size: bool,

    #[serde(rename = "chunkSizeWarningLimit")]
    pub chunk_size_warning_limit_kb: u32,

    #[serde(skip)]
    pub console_strip: bool,
}

impl BuildPolicy {
    /// Output directory, targets and chunk limit are fixed; only the base
    /// path and console stripping come from flags.
    pub fn resolve(flags: &TypedFlags) -> Self {
        Self {
            public_base_path: flags.public_path().to_string(),
            target: JS_TARGET.to_string(),
            css_target: CSS_TARGET.to_string(),
            output_directory: PathBuf::from(OUTPUT_DIR),
            brotli_size: false,
            chunk_size_warning_limit_kb: CHUNK_SIZE_WARNING_LIMIT_KB,
            console_strip: flags.drop_console(),
        }
    }

    pub fn pure_pragmas(&self) -> Vec<String> {
        dead_code_pragmas(self.console_strip)
    }
}
