//! Push sessions over WebSocket.
//!
//! Each upgraded connection registers a [`PushSession`] and runs one task
//! that forwards queued reload messages, reads (and ignores) client traffic
//! and watches for shutdown. Whatever ends the loop, the scoped guard
//! deregisters the session exactly once.

use crate::server::context::{ServerContext, SharedContext};
use crate::server::routes::empty;
use axum::{
    extract::{
        ws::{rejection::WebSocketUpgradeRejection, Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::Response,
};
use futures::{Sink, SinkExt, Stream, StreamExt};
use livehost::{Notifier, PushChannel, PushReceiver, PushSession};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Outbound messages a session may queue before it counts as stalled.
pub const SESSION_QUEUE_CAPACITY: usize = 8;

/// Why a session task stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    /// The client closed the socket.
    ClientClosed,
    /// Reading or writing the socket failed.
    Transport(String),
    /// The session's queue overflowed (or its sender went away) and was drained.
    Evicted,
    /// No traffic within the idle timeout.
    IdleTimeout,
    /// The server is shutting down.
    Shutdown,
}

pub(crate) async fn handle_push(
    State(context): State<SharedContext>,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    let Notifier::Push(channel) = &context.notifier else {
        return empty(StatusCode::NOT_FOUND);
    };
    let ws = match ws {
        Ok(ws) => ws,
        Err(rejection) => {
            tracing::info!(status = 400, "push endpoint requested without upgrade: {}", rejection);
            return empty(StatusCode::BAD_REQUEST);
        }
    };
    if context.is_shutting_down() {
        return empty(StatusCode::SERVICE_UNAVAILABLE);
    }
    let channel = Arc::clone(channel);

    ws.on_upgrade(move |socket| async move {
        run_session(socket, channel, &context).await;
    })
}

/// Drive one session until it ends.
pub async fn run_session(
    socket: WebSocket,
    channel: Arc<PushChannel>,
    context: &ServerContext,
) -> SessionEnd {
    let (session, mut outbound) = PushSession::channel(SESSION_QUEUE_CAPACITY);
    let guard = channel.registry().register_scoped(session);
    let slot = guard.handle().slot();
    tracing::info!(slot, sessions = channel.registry().len(), "push session opened");

    let mut shutdown = context.shutdown_signal();
    let (mut sink, mut stream) = socket.split();
    let end = drive(
        &mut sink,
        &mut stream,
        &mut outbound,
        &mut shutdown,
        context.session_idle_timeout,
        slot,
    )
    .await;

    drop(guard);
    match &end {
        SessionEnd::Transport(e) => tracing::warn!(slot, "push session failed: {}", e),
        other => tracing::info!(slot, reason = ?other, "push session closed"),
    }
    end
}

/// The session loop, over any socket halves.
async fn drive<Tx, Rx, E>(
    sink: &mut Tx,
    stream: &mut Rx,
    outbound: &mut PushReceiver,
    shutdown: &mut watch::Receiver<bool>,
    idle_timeout: Option<Duration>,
    slot: usize,
) -> SessionEnd
where
    Tx: Sink<Message> + Unpin,
    Tx::Error: fmt::Display,
    Rx: Stream<Item = Result<Message, E>> + Unpin,
    E: fmt::Display,
{
    // Shutdown may have started before this receiver subscribed.
    if *shutdown.borrow_and_update() {
        let _ = sink.send(Message::Close(None)).await;
        return SessionEnd::Shutdown;
    }

    loop {
        // Recreated every iteration, so any traffic resets it.
        let idle = async {
            match idle_timeout {
                Some(limit) => tokio::time::sleep(limit).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            message = outbound.recv() => {
                let Some(text) = message else {
                    break SessionEnd::Evicted;
                };
                if let Err(e) = sink.send(Message::Text(text.into())).await {
                    break SessionEnd::Transport(e.to_string());
                }
            }
            incoming = stream.next() => match incoming {
                None | Some(Ok(Message::Close(_))) => break SessionEnd::ClientClosed,
                Some(Ok(Message::Text(text))) => {
                    tracing::debug!(slot, message = %text.as_str(), "client message ignored");
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => break SessionEnd::Transport(e.to_string()),
            },
            () = idle => break SessionEnd::IdleTimeout,
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    let _ = sink.send(Message::Close(None)).await;
                    break SessionEnd::Shutdown;
                }
            }
        }
    }
}
