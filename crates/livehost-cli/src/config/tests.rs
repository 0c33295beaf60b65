#[cfg(test)]
mod tests {
    use crate::cli::Cli;
    use crate::config::*;
    use crate::error::CliError;
    use crate::ConfigError;
    use clap::Parser;
    use figment::Jail;
    use livehost::Strategy;
    use std::net::SocketAddr;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["livehost"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    fn load(args: &[&str]) -> Result<LivehostConfig, figment::Error> {
        LivehostConfig::load(&cli(args)).map_err(|e| figment::Error::from(e.to_string()))
    }

    #[test]
    fn test_defaults() {
        Jail::expect_with(|_jail| {
            let config = load(&[])?;
            assert_eq!(config, LivehostConfig::default());
            assert_eq!(config.root, std::path::PathBuf::from("."));
            assert_eq!(config.listen, vec!["127.0.0.1:8080"]);
            assert_eq!(config.strategy, Strategy::Pull);
            assert_eq!(config.scan_interval_ms, 500);
            assert_eq!(config.poll_interval_ms, 1000);
            assert_eq!(config.push_endpoint, "__livehost__");
            assert_eq!(config.reload_message, "reload");
            assert!(config.session_idle_timeout_secs.is_none());
            Ok(())
        });
    }

    #[test]
    fn test_priority_cli_over_env_over_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE_NAME,
                r#"
                    strategy = "push"
                    scan_interval_ms = 100
                    poll_interval_ms = 300
                    listen = ["9000"]
                "#,
            )?;
            jail.set_env("LIVEHOST_POLL_INTERVAL_MS", "200");
            jail.set_env("LIVEHOST_SCAN_INTERVAL_MS", "150");

            let config = load(&["--scan-interval-ms", "50"])?;
            assert_eq!(config.strategy, Strategy::Push);
            assert_eq!(config.scan_interval_ms, 50);
            assert_eq!(config.poll_interval_ms, 200);
            assert_eq!(config.listen, vec!["9000"]);

            let config = load(&[".", "8081"])?;
            assert_eq!(config.listen, vec!["127.0.0.1:8081"]);
            assert_eq!(config.scan_interval_ms, 150);
            Ok(())
        });
    }

    #[test]
    fn test_explicit_json_config() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "site.json",
                r#"{ "sentinel_prefix": "poll", "session_idle_timeout_secs": 30 }"#,
            )?;

            let config = load(&["--config", "site.json"])?;
            assert_eq!(config.sentinel_prefix, "poll");
            assert_eq!(config.session_idle_timeout_secs, Some(30));
            Ok(())
        });
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        Jail::expect_with(|_jail| {
            let err = LivehostConfig::load(&cli(&["--config", "nope.toml"])).unwrap_err();
            assert!(matches!(err, CliError::Config(ConfigError::NotFound(_))));
            Ok(())
        });
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file(CONFIG_FILE_NAME, "port = 8080")?;
            let err = LivehostConfig::load(&cli(&[])).unwrap_err();
            assert!(matches!(err, CliError::Config(ConfigError::Load(_))));
            Ok(())
        });
    }

    #[test]
    fn test_env_listen_accepts_port_and_list() {
        Jail::expect_with(|jail| {
            jail.set_env("LIVEHOST_LISTEN", "8085");
            assert_eq!(load(&[])?.listen, vec!["8085"]);

            jail.set_env("LIVEHOST_LISTEN", "127.0.0.1:1, http://*:2/");
            assert_eq!(load(&[])?.listen, vec!["127.0.0.1:1", "http://*:2/"]);
            Ok(())
        });
    }

    #[test]
    fn test_validation() {
        Jail::expect_with(|_jail| {
            std::fs::create_dir("site").map_err(|e| e.to_string())?;
            let valid = LivehostConfig {
                root: "site".into(),
                ..LivehostConfig::default()
            };
            assert!(valid.validate().is_ok());

            // Missing root
            assert!(LivehostConfig {
                root: "missing".into(),
                ..valid.clone()
            }
            .validate()
            .is_err());

            // Zero intervals
            assert!(LivehostConfig {
                scan_interval_ms: 0,
                ..valid.clone()
            }
            .validate()
            .is_err());
            assert!(LivehostConfig {
                session_idle_timeout_secs: Some(0),
                ..valid.clone()
            }
            .validate()
            .is_err());

            // Endpoints must be one safe segment
            for bad in ["", ".hidden", "a/b", "a b", "%2e"] {
                assert!(
                    LivehostConfig {
                        push_endpoint: bad.to_string(),
                        ..valid.clone()
                    }
                    .validate()
                    .is_err(),
                    "push_endpoint {bad:?} should be rejected"
                );
            }

            // Listen addresses
            assert!(LivehostConfig {
                listen: vec![],
                ..valid.clone()
            }
            .validate()
            .is_err());
            assert!(LivehostConfig {
                listen: vec!["http://*:80/app/".to_string()],
                ..valid.clone()
            }
            .validate()
            .is_err());
            Ok(())
        });
    }

    #[test]
    fn test_listen_addrs_dedup() {
        let config = LivehostConfig {
            listen: vec![
                "8080".to_string(),
                "127.0.0.1:8080".to_string(),
                "http://*:9000/".to_string(),
            ],
            ..LivehostConfig::default()
        };
        let expected: Vec<SocketAddr> = vec![
            "127.0.0.1:8080".parse().unwrap(),
            "0.0.0.0:9000".parse().unwrap(),
        ];
        assert_eq!(config.listen_addrs().unwrap(), expected);
    }
}
