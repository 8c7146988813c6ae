//! `kiln alias`: rewrite one specifier with the first matching rule.

use crate::cli::AliasArgs;
use crate::error::{CliError, Result};
use crate::settings::KilnSettings;

pub fn execute(args: AliasArgs) -> Result<()> {
    let settings = KilnSettings::for_project(&args.project)?;
    let rules = settings.resolver(&args.project.root).alias_rules()?;

    let rewritten = rules
        .resolve(&args.specifier)
        .ok_or_else(|| CliError::NoAliasMatch(args.specifier.clone()))?;

    println!("{rewritten}");
    Ok(())
}
