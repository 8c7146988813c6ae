use indexmap::IndexMap;
use serde::Serialize;

/// CSS pre-processor configuration handed to the bundler.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CssOptions {
    pub preprocessor_options: PreprocessorOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PreprocessorOptions {
    pub less: LessOptions,
}

/// Less options: injected variables plus inline JavaScript support.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessOptions {
    pub modify_vars: IndexMap<String, String>,

    pub javascript_enabled: bool,
}

impl Default for LessOptions {
    fn default() -> Self {
        Self {
            modify_vars: IndexMap::new(),
            javascript_enabled: true,
        }
    }
}

impl CssOptions {
    /// Wrap generated style variables verbatim.
    pub fn with_variables(modify_vars: IndexMap<String, String>) -> Self {
        Self {
            preprocessor_options: PreprocessorOptions {
                less: LessOptions {
                    modify_vars,
                    javascript_enabled: true,
                },
            },
        }
    }
}
