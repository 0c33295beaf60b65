//! Command-line interface definition.
//!
//! `livehost [ROOT] [LISTEN]...` serves ROOT on every LISTEN address. Any
//! option left out falls back to the config file, then `LIVEHOST_*`
//! environment variables, then built-in defaults.

pub mod enums;
mod tests;
mod validation;

use clap::Parser;
use std::path::PathBuf;

pub use enums::*;
pub use validation::{parse_listen, parse_listen_addr};

/// livehost - static file server with live reload
#[derive(Parser, Debug)]
#[command(
    name = "livehost",
    version,
    about = "Static file server that reloads pages when files change",
    long_about = "livehost serves a directory over HTTP and watches it for changes.\n\
                  Every index.htm it serves gets a small script that reloads the page\n\
                  when anything under the root is added, removed or modified."
)]
pub struct Cli {
    /// Directory to serve
    ///
    /// Defaults to the current directory.
    #[arg(value_name = "ROOT")]
    pub root: Option<PathBuf>,

    /// Addresses to listen on
    ///
    /// A port (`8080`), a socket address (`0.0.0.0:8080`, `[::1]:8080`) or a
    /// listener prefix (`http://*:8080/`). Defaults to 127.0.0.1:8080.
    #[arg(value_name = "LISTEN", value_parser = parse_listen)]
    pub listen: Vec<String>,

    /// Change notification strategy
    #[arg(short, long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Milliseconds between directory scans
    #[arg(long, value_name = "MS")]
    pub scan_interval_ms: Option<u64>,

    /// Milliseconds between client polls (pull strategy)
    #[arg(long, value_name = "MS")]
    pub poll_interval_ms: Option<u64>,

    /// Close push sessions idle for this many seconds
    #[arg(long, value_name = "SECS")]
    pub idle_timeout_secs: Option<u64>,

    /// Config file (TOML or JSON)
    ///
    /// Defaults to livehost.toml in the working directory, if present.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}
