//! Plugin list entries and the standard pipeline.

use serde::Serialize;
use serde_json::{Value, json};

use crate::delegate::{DelegateError, PluginAssembler};
use crate::flags::{TypedFlags, names};

/// One bundler plugin with its options.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PluginSpec {
    pub name: String,

    /// Plugin-specific options forwarded to the bundler
    #[serde(skip_serializing_if = "Value::is_null")]
    pub options: Value,

    /// Restrict the plugin to `build` or `serve`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply: Option<String>,
}

impl PluginSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Value::Null,
            apply: None,
        }
    }

    pub fn with_options(mut self, options: Value) -> Self {
        self.options = options;
        self
    }

    pub fn apply(mut self, apply: impl Into<String>) -> Self {
        self.apply = Some(apply.into());
        self
    }
}

/// Default plugin assembly for a Vue admin front end.
///
/// Framework, HTML, icon, style and theme plugins always run. Mock data is
/// opt-in through `VITE_USE_MOCK`. Legacy output, image minification,
/// compression and PWA support only apply to production builds.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardPipeline;

impl PluginAssembler for StandardPipeline {
    fn assemble(
        &self,
        flags: &TypedFlags,
        is_build: bool,
    ) -> Result<Vec<PluginSpec>, DelegateError> {
        let mut plugins = vec![PluginSpec::new("vite:vue"), PluginSpec::new("vite:vue-jsx")];

        if is_build && flags.bool(names::LEGACY) {
            plugins.push(PluginSpec::new("vite:legacy"));
        }

        plugins.push(PluginSpec::new("vite:html").with_options(json!({
            "minify": is_build,
            "inject": { "data": { "title": flags.app_title().unwrap_or_default() } },
        })));

        plugins.push(PluginSpec::new("vite:purge-icons"));

        if flags.bool(names::USE_MOCK) {
            plugins.push(PluginSpec::new("vite:mock").with_options(json!({
                "ignore": "^_",
                "mockPath": "mock",
                "localEnabled": !is_build,
                "prodEnabled": is_build,
            })));
        }

        plugins.push(PluginSpec::new("vite:windicss"));
        plugins.push(PluginSpec::new("vite:style-import"));
        plugins.push(PluginSpec::new("vite:theme"));

        if is_build {
            if flags.bool(names::USE_IMAGEMIN) {
                plugins.push(PluginSpec::new("vite:imagemin").apply("build"));
            }

            let delete_origin = flags.bool(names::BUILD_COMPRESS_DELETE_ORIGIN_FILE);
            for algorithm in flags.compress() {
                plugins.push(
                    PluginSpec::new("vite:compression")
                        .apply("build")
                        .with_options(json!({
                            "algorithm": algorithm,
                            "ext": algorithm.extension(),
                            "deleteOriginFile": delete_origin,
                        })),
                );
            }

            if flags.bool(names::USE_PWA) {
                plugins.push(PluginSpec::new("vite:pwa").apply("build").with_options(json!({
                    "manifest": {
                        "name": flags.app_title().unwrap_or_default(),
                        "short_name": flags.app_title().unwrap_or_default(),
                    },
                })));
            }
        }

        Ok(plugins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::RawEnvironment;
    use crate::flags::FlagSchema;

    fn flags(pairs: &[(&str, &str)]) -> TypedFlags {
        let raw: RawEnvironment = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        FlagSchema::standard().coerce(&raw).unwrap()
    }

    fn plugin_names(plugins: &[PluginSpec]) -> Vec<&str> {
        plugins.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn serve_gets_core_plugins_only() {
        let plugins = StandardPipeline.assemble(&flags(&[]), false).unwrap();
        assert_eq!(
            plugin_names(&plugins),
            vec![
                "vite:vue",
                "vite:vue-jsx",
                "vite:html",
                "vite:purge-icons",
                "vite:windicss",
                "vite:style-import",
                "vite:theme",
            ]
        );
    }

    #[test]
    fn build_only_plugins_ignore_serve() {
        let flags = flags(&[
            (names::LEGACY, "true"),
            (names::USE_PWA, "true"),
            (names::USE_IMAGEMIN, "true"),
            (names::BUILD_COMPRESS, "gzip"),
        ]);
        let serve = StandardPipeline.assemble(&flags, false).unwrap();
        for name in ["vite:legacy", "vite:pwa", "vite:imagemin", "vite:compression"] {
            assert!(!plugin_names(&serve).contains(&name), "{name} must not run in serve");
        }

        let build = StandardPipeline.assemble(&flags, true).unwrap();
        for name in ["vite:legacy", "vite:pwa", "vite:imagemin", "vite:compression"] {
            assert!(plugin_names(&build).contains(&name), "{name} must run in build");
        }
    }

    #[test]
    fn compression_emits_one_plugin_per_algorithm() {
        let flags = flags(&[
            (names::BUILD_COMPRESS, "gzip,brotli"),
            (names::BUILD_COMPRESS_DELETE_ORIGIN_FILE, "true"),
        ]);
        let plugins = StandardPipeline.assemble(&flags, true).unwrap();
        let compression: Vec<_> = plugins
            .iter()
            .filter(|p| p.name == "vite:compression")
            .collect();

        assert_eq!(compression.len(), 2);
        assert_eq!(compression[0].options["algorithm"], "gzip");
        assert_eq!(compression[1].options["ext"], ".br");
        assert_eq!(compression[1].options["deleteOriginFile"], true);
    }

    #[test]
    fn mock_follows_flag_in_both_commands() {
        let flags = flags(&[(names::USE_MOCK, "true")]);
        let serve = StandardPipeline.assemble(&flags, false).unwrap();
        let mock = serve.iter().find(|p| p.name == "vite:mock").unwrap();
        assert_eq!(mock.options["localEnabled"], true);
        assert_eq!(mock.options["prodEnabled"], false);
    }

    #[test]
    fn html_carries_app_title() {
        let flags = flags(&[(names::APP_TITLE, "Vben Admin")]);
        let plugins = StandardPipeline.assemble(&flags, true).unwrap();
        let html = plugins.iter().find(|p| p.name == "vite:html").unwrap();
        assert_eq!(html.options["inject"]["data"]["title"], "Vben Admin");
        assert_eq!(html.options["minify"], true);
    }
}
