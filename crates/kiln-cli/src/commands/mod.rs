//! Command implementations.

mod alias;
mod flags;
mod resolve;

pub use alias::execute as alias_execute;
pub use flags::execute as flags_execute;
pub use resolve::execute as resolve_execute;

use serde::Serialize;

use crate::error::Result;

/// Render a value as JSON for stdout.
pub(crate) fn render_json<T: Serialize>(value: &T, compact: bool) -> Result<String> {
    let rendered = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(rendered)
}
