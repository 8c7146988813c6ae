//! Kiln CLI - resolves bundler configuration from `.env` declarations.
//!
//! Parses arguments, installs logging, and dispatches to the selected command.

use clap::Parser;
use kiln_cli::{cli, commands, logger};
use miette::Result;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);

    let result = match args.command {
        cli::Command::Resolve(resolve_args) => commands::resolve_execute(resolve_args),
        cli::Command::Flags(flags_args) => commands::flags_execute(flags_args),
        cli::Command::Alias(alias_args) => commands::alias_execute(alias_args),
    };

    result.map_err(miette::Report::new)
}
