//! Delegate boundary behavior: outputs pass through, failures propagate.

use indexmap::IndexMap;
use kiln_config::{
    Command, ConfigError, DelegateError, ManifestSource, MapLoader, PackageManifest,
    PluginAssembler, PluginSpec, Resolver, StyleVariables, TypedFlags,
};
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

fn resolver(pairs: &[(&'static str, &'static str)]) -> Resolver {
    let loader: MapLoader = pairs.iter().copied().collect();
    Resolver::new("/app", Box::new(loader))
        .with_manifest(ManifestSource::Inline(PackageManifest::default()))
}

/// Records what it was called with and returns a fixed, unsorted list.
struct RecordingAssembler {
    calls: Rc<RefCell<Vec<(TypedFlags, bool)>>>,
}

impl PluginAssembler for RecordingAssembler {
    fn assemble(
        &self,
        flags: &TypedFlags,
        is_build: bool,
    ) -> Result<Vec<PluginSpec>, DelegateError> {
        self.calls.borrow_mut().push((flags.clone(), is_build));
        Ok(vec![
            PluginSpec::new("zeta"),
            PluginSpec::new("alpha").with_options(json!({ "keep": true })),
            PluginSpec::new("zeta"),
        ])
    }
}

struct FailingAssembler;

impl PluginAssembler for FailingAssembler {
    fn assemble(&self, _: &TypedFlags, _: bool) -> Result<Vec<PluginSpec>, DelegateError> {
        Err(DelegateError::new("plugins", "compression plugin misconfigured"))
    }
}

struct FixedStyles;

impl StyleVariables for FixedStyles {
    fn generate(&self) -> Result<IndexMap<String, String>, DelegateError> {
        Ok(IndexMap::from([
            ("primary-color".to_string(), "#123456".to_string()),
            ("hack".to_string(), "true;".to_string()),
        ]))
    }
}

struct FailingStyles;

impl StyleVariables for FailingStyles {
    fn generate(&self) -> Result<IndexMap<String, String>, DelegateError> {
        Err(DelegateError::new("styles", "theme file unreadable"))
    }
}

#[test]
fn plugin_list_is_embedded_untouched() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let config = resolver(&[("VITE_USE_MOCK", "true")])
        .with_plugins(Box::new(RecordingAssembler {
            calls: Rc::clone(&calls),
        }))
        .resolve(Command::Build, "production")
        .expect("resolve");

    let names: Vec<_> = config.plugins.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["zeta", "alpha", "zeta"]);
    assert_eq!(config.plugins[1].options, json!({ "keep": true }));

    let calls = calls.borrow();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].1, "build passes is_build = true");
    assert!(calls[0].0.bool("VITE_USE_MOCK"));
}

#[test]
fn serve_passes_dev_mode_to_assembler() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    resolver(&[("VITE_PORT", "3100")])
        .with_plugins(Box::new(RecordingAssembler {
            calls: Rc::clone(&calls),
        }))
        .resolve(Command::Serve, "development")
        .expect("resolve");

    assert!(!calls.borrow()[0].1);
}

#[test]
fn plugin_failure_propagates_unchanged() {
    let err = resolver(&[])
        .with_plugins(Box::new(FailingAssembler))
        .resolve(Command::Build, "production")
        .expect_err("delegate failure");

    match err {
        ConfigError::Delegate(inner) => {
            assert_eq!(inner.delegate, "plugins");
            assert_eq!(inner.message, "compression plugin misconfigured");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn style_variables_are_forwarded_verbatim() {
    let config = resolver(&[])
        .with_styles(Box::new(FixedStyles))
        .resolve(Command::Build, "production")
        .expect("resolve");

    let less = &config.css.preprocessor_options.less;
    assert!(less.javascript_enabled);
    assert_eq!(
        less.modify_vars.keys().collect::<Vec<_>>(),
        vec!["primary-color", "hack"]
    );
}

#[test]
fn style_failure_propagates_unchanged() {
    let err = resolver(&[])
        .with_styles(Box::new(FailingStyles))
        .resolve(Command::Build, "production")
        .expect_err("delegate failure");

    assert_eq!(err.to_string(), "styles: theme file unreadable");
}
