//! Flag schema and coercion from raw strings to typed values.
//!
//! Boolean flags use a strict allow-list: only the literal `"true"` is
//! true. `"1"`, `"TRUE"`, `"yes"` and the empty string are all false.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::env::RawEnvironment;
use crate::error::{ConfigError, Result};

/// Recognized flag names.
pub mod names {
    pub const PUBLIC_PATH: &str = "VITE_PUBLIC_PATH";
    pub const PORT: &str = "VITE_PORT";
    pub const PROXY: &str = "VITE_PROXY";
    pub const DROP_CONSOLE: &str = "VITE_DROP_CONSOLE";
    pub const USE_MOCK: &str = "VITE_USE_MOCK";
    pub const USE_PWA: &str = "VITE_USE_PWA";
    pub const USE_IMAGEMIN: &str = "VITE_USE_IMAGEMIN";
    pub const LEGACY: &str = "VITE_LEGACY";
    pub const BUILD_COMPRESS: &str = "VITE_BUILD_COMPRESS";
    pub const BUILD_COMPRESS_DELETE_ORIGIN_FILE: &str = "VITE_BUILD_COMPRESS_DELETE_ORIGIN_FILE";
    pub const APP_TITLE: &str = "VITE_GLOB_APP_TITLE";
}

/// Target type of a recognized flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    /// `"true"` is true, anything else (or absence) is false
    Bool,
    /// Base-10 integer within an inclusive range
    Integer { min: i64, max: i64 },
    /// Passed through unchanged
    String,
    /// JSON document, checked for parseability only
    Structured,
    /// Comma-separated members drawn from a fixed set
    List { allowed: &'static [&'static str] },
}

/// A recognized flag and its default.
#[derive(Debug, Clone, PartialEq)]
pub struct FlagSpec {
    pub name: &'static str,
    pub kind: FlagKind,
    /// Raw value used when the key is absent. Booleans never need one.
    pub default: Option<&'static str>,
}

impl FlagSpec {
    pub const fn new(name: &'static str, kind: FlagKind) -> Self {
        Self {
            name,
            kind,
            default: None,
        }
    }

    pub const fn with_default(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }

    fn coerce(&self, raw: &str) -> Result<FlagValue> {
        match self.kind {
            FlagKind::Bool => Ok(FlagValue::Bool(raw == "true")),
            FlagKind::Integer { min, max } => {
                let parsed: i64 = raw
                    .parse()
                    .map_err(|_| self.invalid(raw, "expected a base-10 integer"))?;
                if parsed < min || parsed > max {
                    return Err(self.invalid(raw, &format!("must be between {min} and {max}")));
                }
                Ok(FlagValue::Integer(parsed))
            }
            FlagKind::String => Ok(FlagValue::String(raw.to_string())),
            FlagKind::Structured => serde_json::from_str(raw)
                .map(FlagValue::Structured)
                .map_err(|e| self.invalid(raw, &format!("expected JSON ({e})"))),
            FlagKind::List { allowed } => {
                let members = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|member| !member.is_empty())
                    .map(|member| {
                        if allowed.contains(&member) {
                            Ok(member.to_string())
                        } else {
                            let hint = format!(
                                "unknown member `{member}`, expected one of {}",
                                allowed.join(", ")
                            );
                            Err(self.invalid(raw, &hint))
                        }
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(FlagValue::List(members))
            }
        }
    }

    fn invalid(&self, raw: &str, hint: &str) -> ConfigError {
        ConfigError::InvalidFlag {
            flag: self.name.to_string(),
            value: raw.to_string(),
            hint: hint.to_string(),
        }
    }
}

/// Fixed set of recognized flags.
#[derive(Debug, Clone, PartialEq)]
pub struct FlagSchema {
    specs: Vec<FlagSpec>,
}

const COMPRESS_MEMBERS: &[&str] = &["gzip", "brotli", "none"];

impl Default for FlagSchema {
    fn default() -> Self {
        Self::standard()
    }
}

impl FlagSchema {
    pub fn new(specs: Vec<FlagSpec>) -> Self {
        Self { specs }
    }

    /// The flags the resolver and the standard plugin pipeline read.
    pub fn standard() -> Self {
        use names::*;

        Self::new(vec![
            FlagSpec::new(PUBLIC_PATH, FlagKind::String).with_default("/"),
            FlagSpec::new(PORT, FlagKind::Integer { min: 1, max: 65_535 }),
            FlagSpec::new(PROXY, FlagKind::Structured),
            FlagSpec::new(DROP_CONSOLE, FlagKind::Bool),
            FlagSpec::new(USE_MOCK, FlagKind::Bool),
            FlagSpec::new(USE_PWA, FlagKind::Bool),
            FlagSpec::new(USE_IMAGEMIN, FlagKind::Bool),
            FlagSpec::new(LEGACY, FlagKind::Bool),
            FlagSpec::new(
                BUILD_COMPRESS,
                FlagKind::List {
                    allowed: COMPRESS_MEMBERS,
                },
            )
            .with_default("none"),
            FlagSpec::new(BUILD_COMPRESS_DELETE_ORIGIN_FILE, FlagKind::Bool),
            FlagSpec::new(APP_TITLE, FlagKind::String),
        ])
    }

    pub fn specs(&self) -> &[FlagSpec] {
        &self.specs
    }

    pub fn get(&self, name: &str) -> Option<&FlagSpec> {
        self.specs.iter().find(|spec| spec.name == name)
    }

    /// Coerce a raw environment into typed flags.
    ///
    /// Any malformed recognized value fails the whole coercion.
    pub fn coerce(&self, raw: &RawEnvironment) -> Result<TypedFlags> {
        let mut values = BTreeMap::new();

        for spec in &self.specs {
            let value = match (raw.get(spec.name), spec.kind) {
                (Some(raw_value), _) => spec.coerce(raw_value)?,
                (None, FlagKind::Bool) => FlagValue::Bool(false),
                (None, _) => match spec.default {
                    Some(default) => spec.coerce(default)?,
                    None => continue,
                },
            };
            tracing::trace!(flag = spec.name, ?value, "coerced flag");
            values.insert(spec.name.to_string(), value);
        }

        let extra = raw
            .iter()
            .filter(|(key, _)| self.get(key).is_none())
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Ok(TypedFlags { values, extra })
    }
}

/// A coerced flag value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FlagValue {
    Bool(bool),
    Integer(i64),
    String(String),
    List(Vec<String>),
    Structured(Value),
}

/// Compression algorithm requested through `VITE_BUILD_COMPRESS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressAlgorithm {
    Gzip,
    Brotli,
}

impl CompressAlgorithm {
    pub fn extension(self) -> &'static str {
        match self {
            CompressAlgorithm::Gzip => ".gz",
            CompressAlgorithm::Brotli => ".br",
        }
    }
}

/// Coerced flags for one resolution.
///
/// Built only by [`FlagSchema::coerce`] and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TypedFlags {
    values: BTreeMap<String, FlagValue>,
    /// Keys outside the schema, kept verbatim.
    extra: BTreeMap<String, String>,
}

impl TypedFlags {
    pub fn get(&self, name: &str) -> Option<&FlagValue> {
        self.values.get(name)
    }

    /// Boolean flag value; absent or non-boolean flags read as false.
    pub fn bool(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(FlagValue::Bool(true)))
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(FlagValue::String(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.values.get(name) {
            Some(FlagValue::Integer(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn list(&self, name: &str) -> &[String] {
        match self.values.get(name) {
            Some(FlagValue::List(members)) => members.as_slice(),
            _ => &[],
        }
    }

    pub fn public_path(&self) -> &str {
        self.string(names::PUBLIC_PATH).unwrap_or("/")
    }

    /// Proxy rule description. Reserved: parsed but not applied to the server.
    pub fn proxy(&self) -> Option<&Value> {
        match self.values.get(names::PROXY) {
            Some(FlagValue::Structured(value)) => Some(value),
            _ => None,
        }
    }

    pub fn drop_console(&self) -> bool {
        self.bool(names::DROP_CONSOLE)
    }

    pub fn app_title(&self) -> Option<&str> {
        self.string(names::APP_TITLE)
    }

    /// Requested compression algorithms; `none` disables every other member.
    pub fn compress(&self) -> Vec<CompressAlgorithm> {
        let members = self.list(names::BUILD_COMPRESS);
        if members.iter().any(|member| member == "none") {
            return Vec::new();
        }
        let mut algorithms = Vec::new();
        for member in members {
            let algorithm = match member.as_str() {
                "gzip" => CompressAlgorithm::Gzip,
                "brotli" => CompressAlgorithm::Brotli,
                _ => continue,
            };
            if !algorithms.contains(&algorithm) {
                algorithms.push(algorithm);
            }
        }
        algorithms
    }

    /// Unrecognized entries, verbatim.
    pub fn extra(&self) -> &BTreeMap<String, String> {
        &self.extra
    }
}
