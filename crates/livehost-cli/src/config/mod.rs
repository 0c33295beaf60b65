//! Configuration with multi-source loading.
//!
//! Merges settings from CLI args, environment variables, and a config file.
//! Priority: CLI > Environment > File > Defaults

mod defaults;
mod loading;
mod tests;
mod validation;

use livehost::Strategy;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

pub use defaults::*;

/// livehost configuration - loaded from livehost.toml, `LIVEHOST_*` and CLI args.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LivehostConfig {
    /// Directory to serve and watch
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Listen addresses, in any form `parse_listen_addr` accepts
    #[serde(default = "default_listen", deserialize_with = "one_or_many")]
    pub listen: Vec<String>,

    /// Change notification strategy (pull, push)
    #[serde(default)]
    pub strategy: Strategy,

    /// Milliseconds between directory scans
    #[serde(default = "default_scan_interval_ms")]
    pub scan_interval_ms: u64,

    /// Milliseconds between client polls (pull)
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// First path segment of the sentinel URL (pull)
    #[serde(default = "default_sentinel_prefix")]
    pub sentinel_prefix: String,

    /// WebSocket endpoint path segment (push)
    #[serde(default = "default_push_endpoint")]
    pub push_endpoint: String,

    /// Text sent to push sessions on change
    #[serde(default = "default_reload_message")]
    pub reload_message: String,

    /// Close push sessions with no traffic for this long
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_idle_timeout_secs: Option<u64>,
}

impl Default for LivehostConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

/// Accept `listen` as a list, a comma-separated string or a bare port, so
/// `LIVEHOST_LISTEN=8080` works like `listen = ["8080"]`.
fn one_or_many<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Listen {
        Many(Vec<String>),
        One(String),
        Port(u64),
    }

    Ok(match Listen::deserialize(deserializer)? {
        Listen::Many(addrs) => addrs,
        Listen::One(addrs) => addrs
            .split(',')
            .map(str::trim)
            .filter(|addr| !addr.is_empty())
            .map(str::to_string)
            .collect(),
        Listen::Port(port) => vec![port.to_string()],
    })
}
