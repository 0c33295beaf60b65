//! Miette diagnostic conversion for CLI errors.

use crate::error::{CliError, ConfigError};
use miette::Report;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(e) => config_error_to_miette(e),
        CliError::Bind { addr, source } => miette::miette!(
            help = "Pick another port or stop the process that holds it",
            "Failed to bind to {}: {}",
            addr,
            source
        ),
        CliError::Custom(message) => match message.split_once(HINT_SEPARATOR) {
            Some((message, hint)) => miette::miette!(help = hint.to_string(), "{}", message),
            None => miette::miette!("{}", message),
        },
        _ => miette::miette!("{}", err),
    }
}

/// How [`ResultExt::with_hint`](crate::error::ResultExt::with_hint) joins a hint to its message.
const HINT_SEPARATOR: &str = "\n\nHint: ";

/// Convert ConfigError to miette Report
pub fn config_error_to_miette(err: ConfigError) -> Report {
    match err {
        ConfigError::InvalidValue { field, value, hint } => miette::miette!(
            help = hint,
            "Invalid value for '{}': {}",
            field,
            value
        ),
        ConfigError::MissingField { field, hint } => {
            miette::miette!(help = hint, "Missing required field: {}", field)
        }
        _ => miette::miette!("Configuration error: {}", err),
    }
}
