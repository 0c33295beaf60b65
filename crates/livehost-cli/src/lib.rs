//! livehost CLI - static file server with live reload.
//!
//! Serves a directory over HTTP, watches it by periodic snapshot and makes
//! every served `index.htm` reload when the tree changes. The heavy lifting
//! (snapshots, signatures, the session registry, path validation) lives in
//! the `livehost` crate; this crate adds the command line, configuration,
//! logging and the axum server.
//!
//! # Modules
//!
//! - [`cli`] - Argument parsing
//! - [`config`] - Layered configuration
//! - [`error`] - Error types with actionable messages
//! - [`logger`] - Structured logging with tracing
//! - [`server`] - HTTP listeners, sentinel polls and push sessions
//! - [`ui`] - Terminal status output
//!
//! # Example
//!
//! ```rust,no_run
//! use clap::Parser;
//! use livehost_cli::{cli::Cli, commands, error::Result, logger};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let args = Cli::parse();
//!     logger::init_logger(args.verbose, args.quiet, args.no_color);
//!     commands::serve_execute(args).await
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod server;
pub mod ui;

pub use config::LivehostConfig;
pub use error::{CliError, ConfigError, Result, ResultExt};
pub use server::{Server, ServerContext};
