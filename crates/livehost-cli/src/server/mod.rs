//! HTTP server: static files, the pull sentinel and push sessions.
//!
//! One accept loop runs per listen address, all sharing one router and one
//! [`ServerContext`]. The change detector runs alongside them on its own
//! timer.

mod context;
mod routes;
mod session;

pub use context::{wait_for_shutdown, ServerContext, SharedContext};
pub use routes::router;
pub use session::{run_session, SessionEnd, SESSION_QUEUE_CAPACITY};

use crate::config::LivehostConfig;
use crate::error::{CliError, Result};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinSet;

/// A bound, not yet running server.
pub struct Server {
    context: SharedContext,
    listeners: Vec<TcpListener>,
    scan_interval: Duration,
}

impl Server {
    /// Bind every listen address and take the baseline snapshot.
    ///
    /// # Errors
    ///
    /// Fails on invalid listen addresses or if any address cannot be bound.
    pub async fn bind(config: &LivehostConfig) -> Result<Self> {
        let addrs = config.listen_addrs()?;

        let mut listeners = Vec::with_capacity(addrs.len());
        for addr in addrs {
            let listener = TcpListener::bind(addr)
                .await
                .map_err(|source| CliError::Bind { addr, source })?;
            listeners.push(listener);
        }

        // The baseline snapshot walks the whole tree.
        let owned = config.clone();
        let context = tokio::task::spawn_blocking(move || ServerContext::new(&owned))
            .await
            .map_err(|e| CliError::Server(format!("baseline snapshot failed: {}", e)))?;

        Ok(Self {
            context,
            listeners,
            scan_interval: config.scan_interval(),
        })
    }

    /// Addresses actually bound (port 0 resolved).
    pub fn local_addrs(&self) -> Vec<SocketAddr> {
        self.listeners
            .iter()
            .filter_map(|listener| listener.local_addr().ok())
            .collect()
    }

    pub fn context(&self) -> &SharedContext {
        &self.context
    }

    /// Serve until [`ServerContext::shutdown`] is called.
    ///
    /// Listeners stop accepting and drain their connections; push sessions
    /// close; the detector stops.
    pub async fn run(self) -> Result<()> {
        let app = router(self.context.clone());
        let mut tasks = JoinSet::new();

        let detector = self.context.detector.clone();
        let signal = self.context.shutdown_signal();
        let scan_interval = self.scan_interval;
        tasks.spawn(async move {
            detector.run(scan_interval, signal).await;
            Ok::<(), std::io::Error>(())
        });

        for listener in self.listeners {
            let app = app.clone();
            let signal = self.context.shutdown_signal();
            tasks.spawn(async move {
                axum::serve(listener, app)
                    .with_graceful_shutdown(wait_for_shutdown(signal))
                    .await
            });
        }

        let mut first_error = None;
        while let Some(joined) = tasks.join_next().await {
            let failure = match joined {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => format!("listener failed: {}", e),
                Err(e) => format!("server task failed: {}", e),
            };
            tracing::error!("{}", failure);
            // One listener failing takes the others down with it.
            self.context.shutdown();
            first_error.get_or_insert(CliError::Server(failure));
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
