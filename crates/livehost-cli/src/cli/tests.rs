#[cfg(test)]
mod tests {
    use crate::cli::{parse_listen_addr, Cli, StrategyArg};
    use clap::Parser;
    use std::net::SocketAddr;
    use std::path::PathBuf;

    fn addr(s: &str) -> SocketAddr {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_listen_addr_forms() {
        assert_eq!(parse_listen_addr("8080"), Ok(addr("127.0.0.1:8080")));
        assert_eq!(parse_listen_addr("0.0.0.0:9000"), Ok(addr("0.0.0.0:9000")));
        assert_eq!(parse_listen_addr("[::1]:8080"), Ok(addr("[::1]:8080")));
        assert_eq!(
            parse_listen_addr("http://*:8080/"),
            Ok(addr("0.0.0.0:8080"))
        );
        assert_eq!(
            parse_listen_addr("http://+:8081"),
            Ok(addr("0.0.0.0:8081"))
        );
        assert_eq!(
            parse_listen_addr("http://localhost:3000/"),
            Ok(addr("127.0.0.1:3000"))
        );
        assert_eq!(
            parse_listen_addr("http://[::1]:3000/"),
            Ok(addr("[::1]:3000"))
        );
    }

    #[test]
    fn test_parse_listen_addr_rejects() {
        assert!(parse_listen_addr("").is_err());
        assert!(parse_listen_addr("localhost").is_err());
        assert!(parse_listen_addr("https://*:443/").is_err());
        assert!(parse_listen_addr("http://*:8080/app/").is_err());
        assert!(parse_listen_addr("http://*/").is_err());
        assert!(parse_listen_addr("http://*:99999/").is_err());
        assert!(parse_listen_addr("70000").is_err());
    }

    #[test]
    fn test_cli_positional_arguments() {
        let cli = Cli::try_parse_from(["livehost", "./site", "8080", "http://*:9090/"]).unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("./site")));
        assert_eq!(cli.listen, vec!["127.0.0.1:8080", "0.0.0.0:9090"]);
        assert!(cli.strategy.is_none());
    }

    #[test]
    fn test_cli_defaults_are_unset() {
        let cli = Cli::try_parse_from(["livehost"]).unwrap();
        assert!(cli.root.is_none());
        assert!(cli.listen.is_empty());
        assert!(cli.scan_interval_ms.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_options() {
        let cli = Cli::try_parse_from([
            "livehost",
            "--strategy",
            "push",
            "--scan-interval-ms",
            "250",
            "--poll-interval-ms",
            "2000",
            "--idle-timeout-secs",
            "60",
            "--config",
            "site.json",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.strategy, Some(StrategyArg::Push));
        assert_eq!(cli.scan_interval_ms, Some(250));
        assert_eq!(cli.poll_interval_ms, Some(2000));
        assert_eq!(cli.idle_timeout_secs, Some(60));
        assert_eq!(cli.config, Some(PathBuf::from("site.json")));
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_rejects_bad_listen_and_conflicts() {
        assert!(Cli::try_parse_from(["livehost", ".", "http://*:80/app"]).is_err());
        assert!(Cli::try_parse_from(["livehost", "-v", "-q"]).is_err());
        assert!(Cli::try_parse_from(["livehost", "--strategy", "sse"]).is_err());
    }

    #[test]
    fn test_strategy_enum_values() {
        use clap::ValueEnum;

        let strategies: Vec<_> = StrategyArg::value_variants()
            .iter()
            .map(|v| v.to_possible_value().unwrap().get_name().to_string())
            .collect();
        assert_eq!(strategies, vec!["pull", "push"]);
    }
}
