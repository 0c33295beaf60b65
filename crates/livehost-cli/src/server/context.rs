//! Shared server state.
//!
//! Built once at startup from the validated config and shared with every
//! handler through `Arc`.

use crate::config::LivehostConfig;
use livehost::{ChangeDetector, Notifier, PullChannel, PushChannel, StaticResponder, Strategy};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Everything request handlers and background tasks need.
pub struct ServerContext {
    /// Configured notification channel
    pub notifier: Notifier,
    /// Static file responder for the root
    pub responder: StaticResponder,
    /// Change detector driving the notifier
    pub detector: Arc<ChangeDetector>,
    /// Idle limit for push sessions
    pub session_idle_timeout: Option<Duration>,
    shutdown: watch::Sender<bool>,
}

/// Shared context handle.
pub type SharedContext = Arc<ServerContext>;

impl ServerContext {
    /// Build the notifier, take the baseline snapshot and prepare the responder.
    pub fn new(config: &LivehostConfig) -> SharedContext {
        let notifier = match config.strategy {
            Strategy::Pull => Notifier::Pull(Arc::new(PullChannel::new(
                config.sentinel_prefix.clone(),
                config.poll_interval_ms,
            ))),
            Strategy::Push => Notifier::Push(Arc::new(PushChannel::new(
                config.push_endpoint.clone(),
                config.reload_message.clone(),
            ))),
        };

        let detector = Arc::new(ChangeDetector::new(&config.root, notifier.channel()));
        tracing::debug!(
            entries = detector.snapshot().len(),
            "baseline snapshot taken"
        );

        let (shutdown, _) = watch::channel(false);

        Arc::new(Self {
            notifier,
            responder: StaticResponder::new(&config.root),
            detector,
            session_idle_timeout: config.session_idle_timeout(),
            shutdown,
        })
    }

    /// A receiver that turns true once shutdown starts.
    pub fn shutdown_signal(&self) -> watch::Receiver<bool> {
        self.shutdown.subscribe()
    }

    /// Start shutdown: listeners stop accepting, sessions and the detector exit.
    pub fn shutdown(&self) {
        self.shutdown.send_replace(true);
    }

    pub fn is_shutting_down(&self) -> bool {
        *self.shutdown.borrow()
    }
}

/// Resolves once `signal` turns true or its sender is gone.
pub async fn wait_for_shutdown(mut signal: watch::Receiver<bool>) {
    // Err means the sender is gone, which is shutdown as well.
    let _ = signal.wait_for(|stopping| *stopping).await;
}
