use super::{NotificationChannel, Strategy};
use crate::error::SessionError;
use crate::registry::{ConnectionRegistry, Session};
use crate::script::push_script;
use crate::snapshot::TreeSnapshot;
use std::sync::Arc;
use tokio::sync::{mpsc, Notify};

/// Default WebSocket endpoint path (without leading `/`).
pub const DEFAULT_PUSH_ENDPOINT: &str = "__livehost__";

/// Default text sent to sessions on change.
pub const DEFAULT_RELOAD_MESSAGE: &str = "reload";

/// Outbound queue of one persistent connection.
///
/// The connection task owns the matching [`PushReceiver`] and forwards
/// messages to the socket. Sending never waits: a full queue is reported as
/// backpressure and flags the session for eviction.
#[derive(Debug, Clone)]
pub struct PushSession {
    tx: mpsc::Sender<String>,
    evict: Arc<Notify>,
}

impl PushSession {
    /// Create a session and the receiver its connection task drains.
    pub fn channel(capacity: usize) -> (Self, PushReceiver) {
        let (tx, rx) = mpsc::channel(capacity);
        let evict = Arc::new(Notify::new());
        (
            Self {
                tx,
                evict: Arc::clone(&evict),
            },
            PushReceiver { rx, evict },
        )
    }
}

impl Session for PushSession {
    fn send(&self, message: &str) -> Result<(), SessionError> {
        self.tx.try_send(message.to_string()).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => {
                self.evict.notify_one();
                SessionError::Backpressure
            }
            mpsc::error::TrySendError::Closed(_) => SessionError::Closed,
        })
    }
}

/// Receiving half of a [`PushSession`].
#[derive(Debug)]
pub struct PushReceiver {
    rx: mpsc::Receiver<String>,
    evict: Arc<Notify>,
}

impl PushReceiver {
    /// Next queued message.
    ///
    /// Returns `None` once every sender is gone, or after the queue has
    /// drained following a backpressure failure. The owner should then end the
    /// connection and drop its guard.
    pub async fn recv(&mut self) -> Option<String> {
        tokio::select! {
            biased;
            message = self.rx.recv() => message,
            () = self.evict.notified() => None,
        }
    }

    pub fn try_recv(&mut self) -> Option<String> {
        self.rx.try_recv().ok()
    }
}

/// Push delivery: broadcasts a fixed message to every registered session.
pub struct PushChannel {
    endpoint: String,
    message: String,
    registry: Arc<ConnectionRegistry<PushSession>>,
}

impl PushChannel {
    /// `endpoint` is the WebSocket path without its leading `/`.
    pub fn new(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            message: message.into(),
            registry: Arc::new(ConnectionRegistry::new()),
        }
    }

    /// Endpoint path including the leading `/`.
    pub fn endpoint_path(&self) -> String {
        format!("/{}", self.endpoint)
    }

    pub fn registry(&self) -> &Arc<ConnectionRegistry<PushSession>> {
        &self.registry
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl NotificationChannel for PushChannel {
    fn baseline(&self, _snapshot: &TreeSnapshot) {}

    fn notify(&self, _snapshot: &TreeSnapshot) {
        let report = self.registry.broadcast(&self.message);
        tracing::info!(
            delivered = report.delivered,
            failed = report.failed.len(),
            "Reload broadcast"
        );
    }

    fn client_script(&self) -> String {
        push_script(&self.endpoint_path())
    }

    fn strategy(&self) -> Strategy {
        Strategy::Push
    }
}
