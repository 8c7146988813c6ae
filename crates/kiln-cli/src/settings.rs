//! Kiln's own settings, layered from several sources.
//!
//! Priority: CLI args > `KILN_*` environment variables > `kiln.toml` > defaults

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format as _, Serialized, Toml},
};
use kiln_config::env::DEFAULT_ENV_PREFIX;
use kiln_config::theme::DEFAULT_PRIMARY_COLOR;
use kiln_config::{DotenvLoader, ManifestSource, RawEnvironment, Resolver, ThemeVariables};
use serde::{Deserialize, Serialize};

use crate::cli::ProjectArgs;
use crate::error::{CliError, Result};

pub const SETTINGS_FILE: &str = "kiln.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KilnSettings {
    /// Directory holding the `.env*` files, relative to the root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_dir: Option<PathBuf>,

    /// Key prefixes the loader keeps
    #[serde(default = "default_env_prefixes")]
    pub env_prefixes: Vec<String>,

    /// Pass prefixed process variables to the loader as overrides
    #[serde(default)]
    pub inherit_process_env: bool,

    /// Package manifest, relative to the root
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,

    /// Primary theme color injected into Less
    #[serde(default = "default_primary_color")]
    pub primary_color: String,
}

impl Default for KilnSettings {
    fn default() -> Self {
        Self {
            env_dir: None,
            env_prefixes: default_env_prefixes(),
            inherit_process_env: false,
            manifest: default_manifest(),
            primary_color: default_primary_color(),
        }
    }
}

fn default_env_prefixes() -> Vec<String> {
    vec![DEFAULT_ENV_PREFIX.to_string()]
}

fn default_manifest() -> PathBuf {
    PathBuf::from("package.json")
}

fn default_primary_color() -> String {
    DEFAULT_PRIMARY_COLOR.to_string()
}

impl KilnSettings {
    /// Load settings for a project.
    ///
    /// An explicit `config_path` must exist; otherwise `<root>/kiln.toml` is
    /// used when present.
    pub fn load(root: &Path, config_path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        let settings_file = match config_path {
            Some(path) if !path.is_file() => {
                return Err(CliError::SettingsNotFound(path.to_path_buf()));
            }
            Some(path) => Some(path.to_path_buf()),
            None => {
                let default_path = root.join(SETTINGS_FILE);
                default_path.is_file().then_some(default_path)
            }
        };

        if let Some(path) = settings_file {
            tracing::debug!("Loading settings from {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        // KILN_ENV_DIR, KILN_PRIMARY_COLOR, ...
        figment = figment.merge(Env::prefixed("KILN_"));

        figment
            .extract()
            .map_err(|e| CliError::Settings(e.to_string()))
    }

    /// Load settings for the project described by CLI args.
    pub fn for_project(project: &ProjectArgs) -> Result<Self> {
        Self::load(&project.root, project.config.as_deref())
    }

    pub fn env_dir(&self, root: &Path) -> PathBuf {
        match &self.env_dir {
            Some(dir) => root.join(dir),
            None => root.to_path_buf(),
        }
    }

    /// Build the environment loader, reading process variables only when
    /// `inherit_process_env` is set.
    pub fn loader(&self, root: &Path) -> DotenvLoader {
        let loader =
            DotenvLoader::new(self.env_dir(root)).with_prefixes(self.env_prefixes.iter().cloned());
        if self.inherit_process_env {
            loader.with_overrides(self.process_overrides())
        } else {
            loader
        }
    }

    fn process_overrides(&self) -> RawEnvironment {
        std::env::vars()
            .filter(|(key, _)| {
                self.env_prefixes
                    .iter()
                    .any(|prefix| !prefix.is_empty() && key.starts_with(prefix.as_str()))
            })
            .collect::<BTreeMap<_, _>>()
    }

    /// Resolver wired with these settings.
    pub fn resolver(&self, root: &Path) -> Resolver {
        Resolver::new(root, Box::new(self.loader(root)))
            .with_manifest(ManifestSource::File(root.join(&self.manifest)))
            .with_styles(Box::new(
                ThemeVariables::new(root).with_primary_color(self.primary_color.clone()),
            ))
    }
}
