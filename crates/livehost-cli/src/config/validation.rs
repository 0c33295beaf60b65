use crate::cli::parse_listen_addr;
use crate::config::LivehostConfig;
use crate::error::{ConfigError, Result};
use std::net::SocketAddr;
use std::time::Duration;

/// Validate a value that becomes a single URL path segment.
pub fn validate_path_segment(field: &str, value: &str) -> Result<()> {
    let valid = !value.is_empty()
        && !value.starts_with('.')
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            hint: "Use a single path segment of letters, digits, '-', '_' or '.'".to_string(),
        }
        .into())
    }
}

fn require_positive(field: &str, value: u64) -> Result<()> {
    if value == 0 {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value: "0".to_string(),
            hint: "Must be greater than zero".to_string(),
        }
        .into());
    }
    Ok(())
}

impl LivehostConfig {
    /// Validate configuration for logical consistency.
    pub fn validate(&self) -> Result<()> {
        if !self.root.is_dir() {
            return Err(ConfigError::InvalidValue {
                field: "root".to_string(),
                value: self.root.display().to_string(),
                hint: "The root must be an existing directory".to_string(),
            }
            .into());
        }

        if self.listen.is_empty() {
            return Err(ConfigError::MissingField {
                field: "listen".to_string(),
                hint: "Provide at least one listen address, e.g. 127.0.0.1:8080".to_string(),
            }
            .into());
        }
        self.listen_addrs()?;

        require_positive("scan_interval_ms", self.scan_interval_ms)?;
        require_positive("poll_interval_ms", self.poll_interval_ms)?;
        if let Some(secs) = self.session_idle_timeout_secs {
            require_positive("session_idle_timeout_secs", secs)?;
        }

        validate_path_segment("sentinel_prefix", &self.sentinel_prefix)?;
        validate_path_segment("push_endpoint", &self.push_endpoint)?;

        if self.reload_message.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "reload_message".to_string(),
                value: String::new(),
                hint: "The reload message cannot be empty".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Parsed listen addresses, duplicates removed, in order.
    pub fn listen_addrs(&self) -> Result<Vec<SocketAddr>> {
        let mut addrs: Vec<SocketAddr> = Vec::with_capacity(self.listen.len());
        for raw in &self.listen {
            let addr = parse_listen_addr(raw).map_err(|hint| ConfigError::InvalidValue {
                field: "listen".to_string(),
                value: raw.clone(),
                hint,
            })?;
            if !addrs.contains(&addr) {
                addrs.push(addr);
            }
        }
        Ok(addrs)
    }

    pub fn scan_interval(&self) -> Duration {
        Duration::from_millis(self.scan_interval_ms)
    }

    pub fn session_idle_timeout(&self) -> Option<Duration> {
        self.session_idle_timeout_secs.map(Duration::from_secs)
    }
}
