//! Default Less variable generator.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use path_clean::PathClean;

use crate::delegate::{DelegateError, StyleVariables};

pub const DEFAULT_PRIMARY_COLOR: &str = "#0960bd";

/// Stylesheet imported by reference into every Less file.
pub const DESIGN_CONFIG: &str = "src/design/config.less";

/// Theme colors and sizes for the component library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeVariables {
    root: PathBuf,
    primary_color: String,
}

impl ThemeVariables {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
        }
    }

    pub fn with_primary_color(mut self, color: impl Into<String>) -> Self {
        self.primary_color = color.into();
        self
    }
}

impl StyleVariables for ThemeVariables {
    fn generate(&self) -> Result<IndexMap<String, String>, DelegateError> {
        if self.primary_color.trim().is_empty() {
            return Err(DelegateError::new("theme", "primary color cannot be empty"));
        }

        let design_config = self.root.join(DESIGN_CONFIG).clean();
        let primary = self.primary_color.clone();

        Ok(IndexMap::from([
            // Prepends the design tokens to every Less module
            (
                "hack".to_string(),
                format!(
                    "true; @import (reference) \"{}\";",
                    design_config.display()
                ),
            ),
            ("primary-color".to_string(), primary.clone()),
            ("link-color".to_string(), primary),
            ("success-color".to_string(), "#55D187".to_string()),
            ("error-color".to_string(), "#ED6F6F".to_string()),
            ("warning-color".to_string(), "#EFBD47".to_string()),
            ("font-size-base".to_string(), "14px".to_string()),
            ("border-radius-base".to_string(), "2px".to_string()),
            ("app-content-background".to_string(), "#fafafa".to_string()),
        ]))
    }
}
