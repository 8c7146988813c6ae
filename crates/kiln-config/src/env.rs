//! Raw environment loading.
//!
//! Loaders produce a [`RawEnvironment`]: untyped string pairs for one mode.
//! Nothing here reads ambient process state; callers that want process
//! variables pass them in explicitly with [`DotenvLoader::with_overrides`].
//! `$NAME` and `${NAME}` references in file values resolve against the loaded
//! files only, never against the process environment.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::{ConfigError, Result};

/// Key/value pairs exactly as declared, every value is text.
pub type RawEnvironment = BTreeMap<String, String>;

/// Default prefix a key must carry to be loaded.
pub const DEFAULT_ENV_PREFIX: &str = "VITE_";

/// Source of raw environment declarations for a mode.
pub trait EnvLoader {
    fn load(&self, mode: &str) -> Result<RawEnvironment>;
}

/// Loads `.env` files from a directory.
///
/// Files are applied lowest to highest precedence:
/// `.env`, `.env.local`, `.env.<mode>`, `.env.<mode>.local`.
/// At least one of the two mode files must exist. Values reference other
/// declarations with `$NAME` or `${NAME}`; `\$` keeps a literal dollar sign,
/// single-quoted values are taken literally, and unknown names expand to
/// the empty string.
///
/// # Example
///
/// ```no_run
/// use kiln_config::{DotenvLoader, EnvLoader};
///
/// let env = DotenvLoader::new("config/env").load("production").unwrap();
/// println!("{:?}", env.get("VITE_PUBLIC_PATH"));
/// ```
#[derive(Debug, Clone)]
pub struct DotenvLoader {
    dir: PathBuf,
    prefixes: Vec<String>,
    overrides: RawEnvironment,
}

impl DotenvLoader {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            prefixes: vec![DEFAULT_ENV_PREFIX.to_string()],
            overrides: RawEnvironment::new(),
        }
    }

    /// Replace the accepted key prefixes.
    pub fn with_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// Values applied after every file, still subject to prefix filtering.
    pub fn with_overrides(mut self, overrides: RawEnvironment) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn accepts(&self, key: &str) -> bool {
        self.prefixes.iter().any(|prefix| key.starts_with(prefix.as_str()))
    }

    fn candidate_files(&self, mode: &str) -> [(PathBuf, bool); 4] {
        [
            (self.dir.join(".env"), false),
            (self.dir.join(".env.local"), false),
            (self.dir.join(format!(".env.{mode}")), true),
            (self.dir.join(format!(".env.{mode}.local")), true),
        ]
    }
}

impl EnvLoader for DotenvLoader {
    fn load(&self, mode: &str) -> Result<RawEnvironment> {
        if self.prefixes.is_empty() || self.prefixes.iter().any(|p| p.is_empty()) {
            return Err(ConfigError::EmptyEnvPrefix);
        }

        let files = self.candidate_files(mode);
        let has_mode_source = files
            .iter()
            .any(|(path, mode_file)| *mode_file && path.is_file());
        if !has_mode_source {
            return Err(ConfigError::EnvSourceNotFound {
                mode: mode.to_string(),
                dir: self.dir.clone(),
            });
        }

        let mut declared = BTreeMap::new();
        for (path, _) in files.iter().filter(|(path, _)| path.is_file()) {
            tracing::debug!("Loading environment file: {}", path.display());
            declared.extend(read_env_file(path)?);
        }

        let mut env: RawEnvironment = expand_references(&declared)
            .into_iter()
            .filter(|(key, _)| self.accepts(key))
            .collect();

        for (key, value) in &self.overrides {
            if self.accepts(key) {
                env.insert(key.clone(), value.clone());
            }
        }

        tracing::debug!("Loaded {} environment entries for mode `{}`", env.len(), mode);
        Ok(env)
    }
}

/// A value as written in a `.env` file.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Declaration {
    value: String,
    expand: bool,
}

static REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\\)?\$(?:\{([A-Za-z_][A-Za-z0-9_]*)\}|([A-Za-z_][A-Za-z0-9_]*))")
        .expect("reference pattern is valid")
});

fn read_env_file(path: &Path) -> Result<Vec<(String, Declaration)>> {
    let to_error = |message: String| ConfigError::EnvFile {
        path: path.to_path_buf(),
        message,
    };

    let content = fs::read_to_string(path).map_err(|e| to_error(e.to_string()))?;
    parse_env_file(&content).map_err(to_error)
}

fn parse_env_file(content: &str) -> std::result::Result<Vec<(String, Declaration)>, String> {
    let mut declarations = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line = line.strip_prefix("export ").map_or(line, str::trim_start);
        let Some((key, value)) = line.split_once('=') else {
            return Err(format!("line {}: expected KEY=value, found `{line}`", index + 1));
        };
        let key = key.trim();
        if key.is_empty() || key.contains(char::is_whitespace) {
            return Err(format!("line {}: invalid key `{key}`", index + 1));
        }

        declarations.push((key.to_string(), parse_value(value.trim())));
    }

    Ok(declarations)
}

fn parse_value(raw: &str) -> Declaration {
    let quoted_by = |quote: char| raw.len() >= 2 && raw.starts_with(quote) && raw.ends_with(quote);

    if quoted_by('\'') {
        return Declaration {
            value: raw[1..raw.len() - 1].to_string(),
            expand: false,
        };
    }
    if quoted_by('"') {
        return Declaration {
            value: raw[1..raw.len() - 1].replace("\\n", "\n"),
            expand: true,
        };
    }

    // Unquoted values stop at an inline comment
    let value = match raw.find(" #") {
        Some(end) => raw[..end].trim_end(),
        None => raw,
    };
    Declaration {
        value: value.to_string(),
        expand: true,
    }
}

fn expand_references(declared: &BTreeMap<String, Declaration>) -> RawEnvironment {
    declared
        .iter()
        .map(|(key, declaration)| {
            let mut visiting = vec![key.as_str()];
            (key.clone(), expand(declaration, declared, &mut visiting))
        })
        .collect()
}

fn expand<'a>(
    declaration: &Declaration,
    declared: &'a BTreeMap<String, Declaration>,
    visiting: &mut Vec<&'a str>,
) -> String {
    if !declaration.expand {
        return declaration.value.clone();
    }

    REFERENCE
        .replace_all(&declaration.value, |caps: &Captures<'_>| {
            if caps.get(1).is_some() {
                return caps[0][1..].to_string();
            }
            let name = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
            match declared.get_key_value(name) {
                // Cycles expand to nothing
                Some((key, referenced)) if !visiting.contains(&key.as_str()) => {
                    visiting.push(key.as_str());
                    let value = expand(referenced, declared, visiting);
                    visiting.pop();
                    value
                }
                _ => String::new(),
            }
        })
        .into_owned()
}

/// Serves the same fixed declarations for every mode.
#[derive(Debug, Clone, Default)]
pub struct MapLoader {
    env: RawEnvironment,
}

impl MapLoader {
    pub fn new(env: RawEnvironment) -> Self {
        Self { env }
    }
}

impl<K, V> FromIterator<(K, V)> for MapLoader
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl EnvLoader for MapLoader {
    fn load(&self, _mode: &str) -> Result<RawEnvironment> {
        Ok(self.env.clone())
    }
}
