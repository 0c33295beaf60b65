use crate::cli::Cli;
use crate::config::{LivehostConfig, CONFIG_FILE_NAME, ENV_PREFIX};
use crate::error::{ConfigError, Result};
use figment::{
    providers::{Env, Format as _, Json, Serialized, Toml},
    Figment,
};
use livehost::Strategy;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Keys accepted from `LIVEHOST_*` variables.
const ENV_KEYS: &[&str] = &[
    "root",
    "listen",
    "strategy",
    "scan_interval_ms",
    "poll_interval_ms",
    "sentinel_prefix",
    "push_endpoint",
    "reload_message",
    "session_idle_timeout_secs",
];

/// The subset of settings given on the command line.
#[derive(Debug, Default, Serialize)]
struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    root: Option<PathBuf>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    listen: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    strategy: Option<Strategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scan_interval_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    poll_interval_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    session_idle_timeout_secs: Option<u64>,
}

impl From<&Cli> for CliOverrides {
    fn from(args: &Cli) -> Self {
        Self {
            root: args.root.clone(),
            listen: args.listen.clone(),
            strategy: args.strategy.map(Into::into),
            scan_interval_ms: args.scan_interval_ms,
            poll_interval_ms: args.poll_interval_ms,
            session_idle_timeout_secs: args.idle_timeout_secs,
        }
    }
}

impl From<crate::cli::StrategyArg> for Strategy {
    fn from(s: crate::cli::StrategyArg) -> Self {
        match s {
            crate::cli::StrategyArg::Pull => Strategy::Pull,
            crate::cli::StrategyArg::Push => Strategy::Push,
        }
    }
}

impl LivehostConfig {
    /// Load configuration from multiple sources.
    /// Priority: CLI args > environment variables > config file > defaults
    pub fn load(args: &Cli) -> Result<Self> {
        let config = Self::figment(args)?
            .extract()
            .map_err(ConfigError::from)?;
        Ok(config)
    }

    /// The layered provider stack behind [`LivehostConfig::load`].
    pub fn figment(args: &Cli) -> Result<Figment> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default_config()));

        let config_file = match &args.config {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.clone()).into());
            }
            Some(path) => Some(path.clone()),
            None => {
                let default_path = Path::new(CONFIG_FILE_NAME);
                default_path.exists().then(|| default_path.to_path_buf())
            }
        };

        if let Some(path) = config_file {
            tracing::debug!("Loading config from {}", path.display());
            figment = match path.extension().and_then(|ext| ext.to_str()) {
                Some("json") => figment.merge(Json::file(path)),
                _ => figment.merge(Toml::file(path)),
            };
        }

        // LIVEHOST_ROOT, LIVEHOST_SCAN_INTERVAL_MS, ...
        figment = figment.merge(Env::prefixed(ENV_PREFIX).only(ENV_KEYS));

        figment = figment.merge(Serialized::defaults(CliOverrides::from(args)));

        Ok(figment)
    }

    /// Get default configuration values.
    pub(crate) fn default_config() -> Self {
        use crate::config::defaults::*;

        Self {
            root: default_root(),
            listen: default_listen(),
            strategy: Strategy::default(),
            scan_interval_ms: default_scan_interval_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            sentinel_prefix: default_sentinel_prefix(),
            push_endpoint: default_push_endpoint(),
            reload_message: default_reload_message(),
            session_idle_timeout_secs: None,
        }
    }
}
