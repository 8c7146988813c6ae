//! Module path aliases.
//!
//! Rules are kept in declaration order and never merged or deduplicated:
//! when two rules match the same specifier, the earlier one wins.

use std::path::{Path, PathBuf};

use path_clean::PathClean;
use regex::Regex;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::{ConfigError, Result};

/// How a rule recognizes an import specifier.
#[derive(Debug, Clone)]
pub enum AliasMatcher {
    /// Matches the specifier itself or the specifier followed by `/...`
    Exact(String),
    /// Matches anywhere in the specifier
    Pattern(Regex),
}

impl AliasMatcher {
    pub fn pattern(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(AliasMatcher::Pattern)
            .map_err(|e| ConfigError::InvalidAliasPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })
    }

    pub fn matches(&self, specifier: &str) -> bool {
        match self {
            AliasMatcher::Exact(find) => match specifier.strip_prefix(find.as_str()) {
                Some(rest) => rest.is_empty() || rest.starts_with('/'),
                None => false,
            },
            AliasMatcher::Pattern(regex) => regex.is_match(specifier),
        }
    }

    /// Replace the first occurrence of the matcher in `specifier`.
    fn rewrite(&self, specifier: &str, replacement: &str) -> String {
        match self {
            AliasMatcher::Exact(find) => specifier.replacen(find.as_str(), replacement, 1),
            AliasMatcher::Pattern(regex) => regex
                .replace(specifier, regex::NoExpand(replacement))
                .into_owned(),
        }
    }
}

impl PartialEq for AliasMatcher {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (AliasMatcher::Exact(a), AliasMatcher::Exact(b)) => a == b,
            (AliasMatcher::Pattern(a), AliasMatcher::Pattern(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl Serialize for AliasMatcher {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            AliasMatcher::Exact(find) => serializer.serialize_str(find),
            AliasMatcher::Pattern(regex) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("regex", regex.as_str())?;
                map.end()
            }
        }
    }
}

/// What an alias points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasTarget {
    /// A bare module path, used verbatim
    Module(String),
    /// A directory relative to the project root; resolved with a trailing slash
    Directory(PathBuf),
}

/// A declared alias before it is bound to a project root.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasDeclaration {
    pub find: AliasMatcher,
    pub target: AliasTarget,
}

impl AliasDeclaration {
    pub fn module(find: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            find: AliasMatcher::Exact(find.into()),
            target: AliasTarget::Module(module.into()),
        }
    }

    pub fn directory(pattern: &str, dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            find: AliasMatcher::pattern(pattern)?,
            target: AliasTarget::Directory(dir.into()),
        })
    }

    /// Standard project aliases:
    /// `vue-i18n` to its CommonJS build, `/@/` to `src/`, `/#/` to `types/`.
    pub fn standard() -> Result<Vec<Self>> {
        Ok(vec![
            Self::module("vue-i18n", "vue-i18n/dist/vue-i18n.cjs.js"),
            Self::directory(r"/@/", "src")?,
            Self::directory(r"/#/", "types")?,
        ])
    }

    fn bind(&self, root: &Path) -> AliasRule {
        let replacement = match &self.target {
            AliasTarget::Module(module) => module.clone(),
            AliasTarget::Directory(dir) => {
                let absolute = root.join(dir).clean();
                format!("{}/", absolute.display())
            }
        };
        AliasRule {
            find: self.find.clone(),
            replacement,
        }
    }
}

/// A bound alias: matcher plus final replacement text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AliasRule {
    pub find: AliasMatcher,
    pub replacement: String,
}

impl AliasRule {
    /// Rewrite `specifier` if this rule matches it.
    pub fn apply(&self, specifier: &str) -> Option<String> {
        self.find
            .matches(specifier)
            .then(|| self.find.rewrite(specifier, &self.replacement))
    }
}

/// Ordered alias rules for one resolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AliasRules(Vec<AliasRule>);

impl AliasRules {
    /// Bind declarations to `root`, keeping their order.
    ///
    /// # Example
    ///
    /// ```
    /// use kiln_config::{AliasDeclaration, AliasRules};
    ///
    /// let rules = AliasRules::bind(&AliasDeclaration::standard().unwrap(), "/app");
    /// assert_eq!(rules.resolve("/@/views/home.vue").as_deref(), Some("/app/src/views/home.vue"));
    /// ```
    pub fn bind(declarations: &[AliasDeclaration], root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self(declarations.iter().map(|decl| decl.bind(root)).collect())
    }

    /// Rewrite with the first matching rule.
    pub fn resolve(&self, specifier: &str) -> Option<String> {
        self.0.iter().find_map(|rule| rule.apply(specifier))
    }

    pub fn rules(&self) -> &[AliasRule] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn standard_rules() -> AliasRules {
        AliasRules::bind(&AliasDeclaration::standard().unwrap(), "/project")
    }

    #[test]
    fn rewrites_src_and_types_prefixes() {
        let rules = standard_rules();
        assert_eq!(
            rules.resolve("/@/router/index.ts").as_deref(),
            Some("/project/src/router/index.ts")
        );
        assert_eq!(
            rules.resolve("/#/config.d.ts").as_deref(),
            Some("/project/types/config.d.ts")
        );
    }

    #[test]
    fn exact_matcher_requires_segment_boundary() {
        let rules = standard_rules();
        assert_eq!(
            rules.resolve("vue-i18n").as_deref(),
            Some("vue-i18n/dist/vue-i18n.cjs.js")
        );
        assert_eq!(rules.resolve("vue-i18n-extra"), None);
    }

    #[test]
    fn unmatched_specifier_is_left_alone() {
        assert_eq!(standard_rules().resolve("lodash-es"), None);
    }

    #[test]
    fn earlier_declaration_wins_on_overlap() {
        let declarations = vec![
            AliasDeclaration::directory(r"/@/", "src").unwrap(),
            AliasDeclaration::directory(r"/@/components/", "legacy").unwrap(),
        ];
        let rules = AliasRules::bind(&declarations, "/project");

        assert_eq!(
            rules.resolve("/@/components/Button.vue").as_deref(),
            Some("/project/src/components/Button.vue")
        );
    }

    #[test]
    fn overlap_is_not_deduplicated() {
        let declarations = vec![
            AliasDeclaration::module("dayjs", "dayjs/esm"),
            AliasDeclaration::module("dayjs", "dayjs/cjs"),
        ];
        let rules = AliasRules::bind(&declarations, "/project");
        assert_eq!(rules.len(), 2);
        assert_eq!(rules.resolve("dayjs").as_deref(), Some("dayjs/esm"));
    }

    #[test]
    fn directory_targets_are_normalized() {
        let declarations = vec![AliasDeclaration::directory(r"/@/", "./src").unwrap()];
        let rules = AliasRules::bind(&declarations, "/project/.");
        assert_eq!(rules.rules()[0].replacement, "/project/src/");
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let err = AliasDeclaration::directory("(unclosed", "src").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidAliasPattern { .. }));
    }

    #[test]
    fn serializes_in_declaration_order() {
        let value = serde_json::to_value(standard_rules()).unwrap();
        assert_eq!(value[0]["find"], json!("vue-i18n"));
        assert_eq!(value[1]["find"], json!({ "regex": "/@/" }));
        assert_eq!(value[2]["replacement"], json!("/project/types/"));
    }
}
