use livehost::{DEFAULT_PUSH_ENDPOINT, DEFAULT_RELOAD_MESSAGE, DEFAULT_SENTINEL_PREFIX};
use std::path::PathBuf;

/// Config file picked up from the working directory.
pub const CONFIG_FILE_NAME: &str = "livehost.toml";

/// Prefix of environment variable overrides.
pub const ENV_PREFIX: &str = "LIVEHOST_";

pub fn default_root() -> PathBuf {
    PathBuf::from(".")
}

pub fn default_listen() -> Vec<String> {
    vec!["127.0.0.1:8080".to_string()]
}

pub fn default_scan_interval_ms() -> u64 {
    livehost::DEFAULT_SCAN_INTERVAL.as_millis() as u64
}

pub fn default_poll_interval_ms() -> u64 {
    1000
}

pub fn default_sentinel_prefix() -> String {
    DEFAULT_SENTINEL_PREFIX.to_string()
}

pub fn default_push_endpoint() -> String {
    DEFAULT_PUSH_ENDPOINT.to_string()
}

pub fn default_reload_message() -> String {
    DEFAULT_RELOAD_MESSAGE.to_string()
}
