//! Command-line interface definition.
//!
//! - `kiln resolve` - print the resolved bundler configuration
//! - `kiln flags` - print the coerced environment flags
//! - `kiln alias` - rewrite one import specifier with the alias rules

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Kiln - environment-driven bundler configuration
#[derive(Parser, Debug)]
#[command(
    name = "kiln",
    version,
    about = "Resolve bundler configuration from .env declarations",
    long_about = "Kiln loads the .env declarations for a mode, coerces them into typed flags\n\
                  and prints the fully resolved bundler configuration as JSON."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available Kiln subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve the full bundler configuration
    ///
    /// Loads .env, .env.local, .env.<mode> and .env.<mode>.local, then prints
    /// the configuration the bundler should start with.
    Resolve(ResolveArgs),

    /// Show the typed flags for a mode
    Flags(FlagsArgs),

    /// Rewrite an import specifier using the alias rules
    ///
    /// Exits with an error when no rule matches.
    Alias(AliasArgs),
}

/// Bundler invocation being configured
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Invocation {
    /// Production build
    Build,
    /// Development server
    Serve,
}

impl From<Invocation> for kiln_config::Command {
    fn from(invocation: Invocation) -> Self {
        match invocation {
            Invocation::Build => kiln_config::Command::Build,
            Invocation::Serve => kiln_config::Command::Serve,
        }
    }
}

/// Project location options shared by every command
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Project root (holds package.json and, by default, the .env files)
    #[arg(short, long, default_value = ".", value_name = "DIR")]
    pub root: PathBuf,

    /// Settings file (defaults to <root>/kiln.toml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Arguments for the resolve command
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Bundler invocation
    #[arg(long = "command", value_enum, default_value = "serve")]
    pub invocation: Invocation,

    /// Environment mode (defaults to development for serve, production for build)
    #[arg(short, long)]
    pub mode: Option<String>,

    /// Print single-line JSON
    #[arg(long)]
    pub compact: bool,

    #[command(flatten)]
    pub project: ProjectArgs,
}

impl ResolveArgs {
    pub fn mode(&self) -> &str {
        match (&self.mode, self.invocation) {
            (Some(mode), _) => mode,
            (None, Invocation::Build) => "production",
            (None, Invocation::Serve) => "development",
        }
    }
}

/// Arguments for the flags command
#[derive(Args, Debug)]
pub struct FlagsArgs {
    /// Environment mode
    #[arg(short, long, default_value = "development")]
    pub mode: String,

    #[command(flatten)]
    pub project: ProjectArgs,
}

/// Arguments for the alias command
#[derive(Args, Debug)]
pub struct AliasArgs {
    /// Import specifier to rewrite (e.g. /@/views/Home.vue)
    #[arg(value_name = "SPECIFIER")]
    pub specifier: String,

    #[command(flatten)]
    pub project: ProjectArgs,
}
