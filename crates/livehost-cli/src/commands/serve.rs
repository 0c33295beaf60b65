//! Serve command implementation.
//!
//! Loads and validates the configuration, binds every listen address, then
//! serves until Ctrl+C.

use crate::cli::Cli;
use crate::config::LivehostConfig;
use crate::error::{Result, ResultExt};
use crate::server::Server;
use crate::ui;
use livehost::Strategy;
use tokio::signal;

/// Execute the serve command.
///
/// # Errors
///
/// Returns errors for invalid configuration, unbindable addresses and
/// listener failures.
pub async fn execute(args: Cli) -> Result<()> {
    let mut config = LivehostConfig::load(&args)?;
    config.root = std::fs::canonicalize(&config.root)
        .with_path(&config.root)
        .with_hint("Pass an existing directory or set root in livehost.toml")?;
    config.validate()?;

    let server = Server::bind(&config).await?;

    ui::info(&format!("Root directory: {}", config.root.display()));
    if server.context().detector.snapshot().is_empty() {
        ui::warning("Nothing to serve yet: the root has no visible files");
    }
    match config.strategy {
        Strategy::Pull => ui::info(&format!(
            "Pull reload: pages poll every {}ms",
            config.poll_interval_ms
        )),
        Strategy::Push => ui::info(&format!(
            "Push reload: WebSocket endpoint /{}",
            config.push_endpoint
        )),
    }
    for addr in server.local_addrs() {
        ui::success(&format!("Serving at http://{}/", addr));
    }
    ui::info("Press Ctrl+C to stop");

    let context = server.context().clone();
    let mut running = tokio::spawn(server.run());

    let result = tokio::select! {
        joined = &mut running => joined,
        _ = signal::ctrl_c() => {
            ui::info("Shutting down...");
            context.shutdown();
            running.await
        }
    };

    match result {
        Ok(Ok(())) => {
            ui::success("Server stopped");
            Ok(())
        }
        Ok(Err(e)) => {
            ui::error(&format!("Server error: {}", e));
            Err(e)
        }
        Err(e) => Err(crate::error::CliError::Server(format!(
            "server task failed: {}",
            e
        ))),
    }
}
