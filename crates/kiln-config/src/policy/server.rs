use serde::Serialize;

use crate::error::{ConfigError, Result};
use crate::flags::{FlagValue, TypedFlags, names};
use crate::policy::Command;

/// Development server transport options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServerPolicy {
    #[serde(rename = "https")]
    pub tls_enabled: bool,

    #[serde(rename = "host")]
    pub bind_all_interfaces: bool,

    pub port: u16,
}

impl ServerPolicy {
    /// TLS and binding to every interface are fixed on. The port has no
    /// fallback: `serve` fails without one, `build` simply omits the server.
    /// A present port must be an integer in `1..=65535` whatever the schema
    /// allowed.
    pub fn resolve(flags: &TypedFlags, command: Command) -> Result<Option<Self>> {
        let port = match (flags.get(names::PORT), command) {
            (Some(value), _) => checked_port(value)?,
            (None, Command::Serve) => {
                return Err(ConfigError::MissingFlag {
                    flag: names::PORT.to_string(),
                });
            }
            (None, Command::Build) => {
                tracing::debug!("{} not set, omitting dev-server options", names::PORT);
                return Ok(None);
            }
        };

        Ok(Some(Self {
            tls_enabled: true,
            bind_all_interfaces: true,
            port,
        }))
    }
}

fn checked_port(value: &FlagValue) -> Result<u16> {
    let port = match value {
        FlagValue::Integer(raw) => u16::try_from(*raw).ok().filter(|port| *port != 0),
        _ => None,
    };

    port.ok_or_else(|| ConfigError::InvalidFlag {
        flag: names::PORT.to_string(),
        value: match value {
            FlagValue::String(raw) => raw.clone(),
            other => serde_json::to_string(other).unwrap_or_default(),
        },
        hint: "must be an integer between 1 and 65535".to_string(),
    })
}
