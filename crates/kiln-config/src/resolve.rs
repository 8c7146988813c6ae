//! The resolver: one call turns `(command, mode)` into a bundler config.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::alias::{AliasDeclaration, AliasRules};
use crate::delegate::{PluginAssembler, StyleVariables};
use crate::env::EnvLoader;
use crate::error::{ConfigError, Result};
use crate::flags::{FlagSchema, TypedFlags};
use crate::metadata::{AppMetadata, ManifestSource};
use crate::plugins::{PluginSpec, StandardPipeline};
use crate::policy::{BuildPolicy, Command, CssOptions, ServerPolicy};
use crate::theme::ThemeVariables;

/// Dependencies pre-bundled even though they are only reached dynamically.
pub const OPTIMIZE_DEPS_INCLUDE: [&str; 5] = [
    "@vue/runtime-core",
    "@vue/shared",
    "@iconify/iconify",
    "ant-design-vue/es/locale/zh_CN",
    "ant-design-vue/es/locale/en_US",
];

/// Fully resolved configuration for one bundler startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfiguration {
    pub command: Command,
    pub mode: String,
    pub root: PathBuf,
    pub flags: TypedFlags,
    pub build: BuildPolicy,
    pub server: Option<ServerPolicy>,
    pub aliases: AliasRules,
    pub metadata: AppMetadata,
    pub define: IndexMap<String, Value>,
    pub css: CssOptions,
    pub plugins: Vec<PluginSpec>,
    pub optimize_deps: Vec<String>,
}

impl ResolvedConfiguration {
    pub fn public_base_path(&self) -> &str {
        &self.build.public_base_path
    }

    /// Markers the bundler strips from production output.
    pub fn pure_pragmas(&self) -> Vec<String> {
        self.build.pure_pragmas()
    }

    /// Convert to the bundler's JSON config shape.
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue(e.to_string()))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BundlerConfig<'a> {
    base: &'a str,
    root: &'a Path,
    resolve: ResolveSection<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    server: Option<&'a ServerPolicy>,
    esbuild: EsbuildSection,
    build: &'a BuildPolicy,
    define: &'a IndexMap<String, Value>,
    css: &'a CssOptions,
    plugins: &'a [PluginSpec],
    optimize_deps: OptimizeDepsSection<'a>,
}

#[derive(Serialize)]
struct ResolveSection<'a> {
    alias: &'a AliasRules,
}

#[derive(Serialize)]
struct EsbuildSection {
    pure: Vec<String>,
}

#[derive(Serialize)]
struct OptimizeDepsSection<'a> {
    include: &'a [String],
}

impl Serialize for ResolvedConfiguration {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        BundlerConfig {
            base: &self.build.public_base_path,
            root: &self.root,
            resolve: ResolveSection {
                alias: &self.aliases,
            },
            server: self.server.as_ref(),
            esbuild: EsbuildSection {
                pure: self.pure_pragmas(),
            },
            build: &self.build,
            define: &self.define,
            css: &self.css,
            plugins: &self.plugins,
            optimize_deps: OptimizeDepsSection {
                include: &self.optimize_deps,
            },
        }
        .serialize(serializer)
    }
}

/// Resolves configuration from injected collaborators.
///
/// Holds no state between calls: every [`Resolver::resolve`] reloads the
/// environment, re-reads the manifest and stamps a new build time.
///
/// # Example
///
/// ```
/// use kiln_config::{Command, MapLoader, ManifestSource, PackageManifest, Resolver};
///
/// let loader: MapLoader = [("VITE_PORT", "3100")].into_iter().collect();
/// let config = Resolver::new("/app", Box::new(loader))
///     .with_manifest(ManifestSource::Inline(PackageManifest::default()))
///     .resolve(Command::Serve, "development")
///     .unwrap();
///
/// assert_eq!(config.server.unwrap().port, 3100);
/// ```
pub struct Resolver {
    root: PathBuf,
    loader: Box<dyn EnvLoader>,
    schema: FlagSchema,
    aliases: Option<Vec<AliasDeclaration>>,
    manifest: ManifestSource,
    plugins: Box<dyn PluginAssembler>,
    styles: Box<dyn StyleVariables>,
}

impl Resolver {
    /// Resolver with the standard schema, aliases and delegates, reading
    /// `package.json` from `root`.
    pub fn new(root: impl AsRef<Path>, loader: Box<dyn EnvLoader>) -> Self {
        let root = root.as_ref().to_path_buf();
        Self {
            manifest: ManifestSource::File(root.join("package.json")),
            styles: Box::new(ThemeVariables::new(&root)),
            plugins: Box::new(StandardPipeline),
            schema: FlagSchema::standard(),
            aliases: None,
            loader,
            root,
        }
    }

    pub fn with_schema(mut self, schema: FlagSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Replace the standard alias declarations; order is preserved.
    pub fn with_aliases(mut self, aliases: Vec<AliasDeclaration>) -> Self {
        self.aliases = Some(aliases);
        self
    }

    pub fn with_manifest(mut self, manifest: ManifestSource) -> Self {
        self.manifest = manifest;
        self
    }

    pub fn with_plugins(mut self, plugins: Box<dyn PluginAssembler>) -> Self {
        self.plugins = plugins;
        self
    }

    pub fn with_styles(mut self, styles: Box<dyn StyleVariables>) -> Self {
        self.styles = styles;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load and coerce the flags for `mode` without resolving anything else.
    pub fn flags(&self, mode: &str) -> Result<TypedFlags> {
        let raw = self.loader.load(mode)?;
        self.schema.coerce(&raw)
    }

    /// Bind the alias declarations to the project root.
    pub fn alias_rules(&self) -> Result<AliasRules> {
        let rules = match &self.aliases {
            Some(declarations) => AliasRules::bind(declarations, &self.root),
            None => AliasRules::bind(&AliasDeclaration::standard()?, &self.root),
        };
        Ok(rules)
    }

    pub fn resolve(&self, command: Command, mode: &str) -> Result<ResolvedConfiguration> {
        tracing::debug!("Resolving configuration: command={}, mode={}", command, mode);

        let flags = self.flags(mode)?;
        let aliases = self.alias_rules()?;
        let server = ServerPolicy::resolve(&flags, command)?;
        let build = BuildPolicy::resolve(&flags);
        tracing::debug!(
            base = %build.public_base_path,
            console_strip = build.console_strip,
            port = ?server.map(|s| s.port),
            "Resolved build and server policy"
        );

        let metadata = AppMetadata::capture(self.manifest.load()?);
        let define = metadata.define_table()?;

        let css = CssOptions::with_variables(self.styles.generate()?);
        let plugins = self.plugins.assemble(&flags, command.is_build())?;
        tracing::debug!("Plugin pipeline assembled with {} plugins", plugins.len());

        Ok(ResolvedConfiguration {
            command,
            mode: mode.to_string(),
            root: self.root.clone(),
            flags,
            build,
            server,
            aliases,
            metadata,
            define,
            css,
            plugins,
            optimize_deps: OPTIMIZE_DEPS_INCLUDE.iter().map(|d| d.to_string()).collect(),
        })
    }
}
