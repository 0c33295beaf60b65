//! Change notification delivery.
//!
//! The detector talks to a [`NotificationChannel`]; which one is chosen at
//! startup:
//!
//! - [`PullChannel`]: keeps the current [`Signature`](crate::Signature) and
//!   answers sentinel polls with 200 (current) or 202 (stale).
//! - [`PushChannel`]: broadcasts a fixed message to every session in its
//!   [`ConnectionRegistry`](crate::ConnectionRegistry).

mod pull;
mod push;

pub use pull::{PollStatus, PullChannel, DEFAULT_SENTINEL_PREFIX};
pub use push::{
    PushChannel, PushReceiver, PushSession, DEFAULT_PUSH_ENDPOINT, DEFAULT_RELOAD_MESSAGE,
};

use crate::snapshot::TreeSnapshot;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Delivery strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Clients poll a signature endpoint.
    #[default]
    Pull,
    /// The server pushes over persistent connections.
    Push,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Pull => f.write_str("pull"),
            Strategy::Push => f.write_str("push"),
        }
    }
}

/// Receives snapshots from the detector and tells clients about them.
pub trait NotificationChannel: Send + Sync {
    /// Record the starting state without notifying anyone.
    fn baseline(&self, snapshot: &TreeSnapshot);

    /// The tree changed; `snapshot` is the new state.
    fn notify(&self, snapshot: &TreeSnapshot);

    /// Script injected into root documents, reflecting the current state.
    fn client_script(&self) -> String;

    fn strategy(&self) -> Strategy;
}

/// The configured channel, keeping access to strategy-specific endpoints.
#[derive(Clone)]
pub enum Notifier {
    Pull(Arc<PullChannel>),
    Push(Arc<PushChannel>),
}

impl Notifier {
    /// The channel as a trait object for the detector.
    pub fn channel(&self) -> Arc<dyn NotificationChannel> {
        match self {
            Notifier::Pull(pull) => pull.clone(),
            Notifier::Push(push) => push.clone(),
        }
    }

    pub fn strategy(&self) -> Strategy {
        match self {
            Notifier::Pull(_) => Strategy::Pull,
            Notifier::Push(_) => Strategy::Push,
        }
    }

    pub fn client_script(&self) -> String {
        match self {
            Notifier::Pull(pull) => pull.client_script(),
            Notifier::Push(push) => push.client_script(),
        }
    }
}
