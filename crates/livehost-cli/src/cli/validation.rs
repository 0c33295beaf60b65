use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Parse a listen address.
///
/// Accepted forms:
/// - a bare port: `8080` (loopback)
/// - a socket address: `127.0.0.1:8080`, `[::1]:8080`
/// - a listener prefix: `http://localhost:8080/`, `http://*:8080/`
///
/// In prefixes `*` and `+` mean every interface. Only the root path is
/// served, so a prefix may not carry a path.
///
/// # Errors
///
/// Returns a message naming the offending input.
pub fn parse_listen_addr(s: &str) -> Result<SocketAddr, String> {
    let input = s.trim();
    if input.is_empty() {
        return Err("Listen address cannot be empty".to_string());
    }

    if let Ok(port) = input.parse::<u16>() {
        return Ok(SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), port));
    }

    if input.starts_with("https://") {
        return Err(format!("TLS listeners are not supported: '{}'", s));
    }

    let Some(rest) = input.strip_prefix("http://") else {
        return input
            .parse()
            .map_err(|_| format!("Invalid listen address: '{}'", s));
    };

    let (authority, path) = rest.split_once('/').unwrap_or((rest, ""));
    if !path.is_empty() {
        return Err(format!(
            "Listen prefixes cannot include a path ('/{}'): '{}'",
            path, s
        ));
    }

    let (host, port) = authority
        .rsplit_once(':')
        .ok_or_else(|| format!("Listen prefix needs an explicit port: '{}'", s))?;
    let port: u16 = port
        .parse()
        .map_err(|_| format!("Invalid port '{}' in '{}'", port, s))?;

    let ip = match host {
        "*" | "+" => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        "localhost" => IpAddr::V4(Ipv4Addr::LOCALHOST),
        host => host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse()
            .map_err(|_| format!("Invalid host '{}' in '{}'", host, s))?,
    };

    Ok(SocketAddr::new(ip, port))
}

/// Clap value parser: validates and normalizes to `ip:port`.
pub fn parse_listen(s: &str) -> Result<String, String> {
    parse_listen_addr(s).map(|addr| addr.to_string())
}
