//! `kiln resolve`: print the resolved bundler configuration.

use kiln_config::Command;

use crate::cli::ResolveArgs;
use crate::commands::render_json;
use crate::error::Result;
use crate::settings::KilnSettings;

pub fn execute(args: ResolveArgs) -> Result<()> {
    let settings = KilnSettings::for_project(&args.project)?;
    let command: Command = args.invocation.into();
    let mode = args.mode();

    let config = settings
        .resolver(&args.project.root)
        .resolve(command, mode)?;

    tracing::info!(
        "Resolved {} configuration for mode `{}` ({} plugins)",
        command,
        mode,
        config.plugins.len()
    );

    println!("{}", render_json(&config, args.compact)?);
    Ok(())
}
