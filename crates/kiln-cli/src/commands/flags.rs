//! `kiln flags`: print the coerced flags for a mode.

use crate::cli::FlagsArgs;
use crate::commands::render_json;
use crate::error::Result;
use crate::settings::KilnSettings;

pub fn execute(args: FlagsArgs) -> Result<()> {
    let settings = KilnSettings::for_project(&args.project)?;
    let flags = settings.resolver(&args.project.root).flags(&args.mode)?;

    if !flags.extra().is_empty() {
        tracing::debug!(
            "{} unrecognized entries kept verbatim: {:?}",
            flags.extra().len(),
            flags.extra().keys().collect::<Vec<_>>()
        );
    }

    println!("{}", render_json(&flags, false)?);
    Ok(())
}
