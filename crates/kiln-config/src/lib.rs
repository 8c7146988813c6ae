//! Environment-to-configuration resolver for front-end bundlers.
//!
//! A [`Resolver`] loads the dotenv declarations for one mode, coerces them
//! into [`TypedFlags`], and derives every section of the bundler config from
//! those flags: alias rules, dev-server and build policy, the compile-time
//! define table, and the plugin list returned by a [`PluginAssembler`].
//!
//! ```no_run
//! use kiln_config::{Command, DotenvLoader, Resolver};
//!
//! let loader = DotenvLoader::new(".");
//! let config = Resolver::new(".", Box::new(loader))
//!     .resolve(Command::Build, "production")
//!     .unwrap();
//! println!("{}", config.to_value().unwrap());
//! ```

pub mod alias;
pub mod delegate;
pub mod env;
pub mod error;
pub mod flags;
pub mod metadata;
pub mod plugins;
pub mod policy;
pub mod resolve;
pub mod theme;

// Re-export main types
pub use alias::{AliasDeclaration, AliasMatcher, AliasRule, AliasRules, AliasTarget};
pub use delegate::{DelegateError, PluginAssembler, StyleVariables};
pub use env::{DotenvLoader, EnvLoader, MapLoader, RawEnvironment};
pub use error::{ConfigError, Result};
pub use flags::{CompressAlgorithm, FlagKind, FlagSchema, FlagSpec, FlagValue, TypedFlags};
pub use metadata::{AppMetadata, ManifestSource, PackageManifest};
pub use plugins::{PluginSpec, StandardPipeline};
pub use policy::{BuildPolicy, Command, CssOptions, LessOptions, ServerPolicy};
pub use resolve::{ResolvedConfiguration, Resolver};
pub use theme::ThemeVariables;
