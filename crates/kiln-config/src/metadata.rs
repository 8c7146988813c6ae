//! Build metadata embedded into the bundle as a compile-time constant.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result};

/// Format of [`AppMetadata::last_build_time`].
pub const BUILD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Name of the define constant carrying [`AppMetadata`].
pub const APP_INFO_DEFINE: &str = "__APP_INFO__";

/// The parts of `package.json` the metadata snapshot keeps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub dependencies: IndexMap<String, String>,

    #[serde(default)]
    pub dev_dependencies: IndexMap<String, String>,
}

impl PackageManifest {
    /// Read and parse a `package.json`.
    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Manifest {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| ConfigError::Manifest {
            path: path.to_path_buf(),
            message: format!("Invalid JSON: {e}"),
        })
    }
}

/// Where the manifest snapshot comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestSource {
    /// Re-read on every resolution
    File(PathBuf),
    Inline(PackageManifest),
}

impl ManifestSource {
    pub fn load(&self) -> Result<PackageManifest> {
        match self {
            ManifestSource::File(path) => PackageManifest::read(path),
            ManifestSource::Inline(manifest) => Ok(manifest.clone()),
        }
    }
}

/// Application info exposed to the built artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppMetadata {
    pub pkg: PackageManifest,
    pub last_build_time: String,
}

impl AppMetadata {
    /// Snapshot `manifest` stamped with the current local time.
    pub fn capture(manifest: PackageManifest) -> Self {
        Self::capture_at(manifest, Local::now())
    }

    pub fn capture_at(manifest: PackageManifest, now: DateTime<Local>) -> Self {
        Self {
            pkg: manifest,
            last_build_time: now.format(BUILD_TIME_FORMAT).to_string(),
        }
    }

    /// Compile-time constants for the bundler's define table.
    pub fn define_table(&self) -> Result<IndexMap<String, Value>> {
        let encoded =
            serde_json::to_string(self).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        let mut define = IndexMap::new();
        // Silences the vue-i18n devtools warning in production bundles
        define.insert("__INTLIFY_PROD_DEVTOOLS__".to_string(), Value::Bool(false));
        define.insert(APP_INFO_DEFINE.to_string(), Value::String(encoded));
        Ok(define)
    }
}
