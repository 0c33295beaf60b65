//! # livehost
//!
//! Core of a live-reload static file host.
//!
//! A [`ChangeDetector`] polls a root directory, compares [`TreeSnapshot`]s
//! and tells a [`NotificationChannel`] when anything changed. Two channels
//! ship with the crate:
//!
//! - [`PullChannel`] keeps a [`Signature`] of the tree. Served pages embed it
//!   and poll a sentinel URL that answers 200 while it is current and 202
//!   once it is stale.
//! - [`PushChannel`] broadcasts a reload message to every live session held
//!   in a pooled [`ConnectionRegistry`].
//!
//! [`StaticResponder`] validates request paths, serves files with a fixed
//! MIME table and injects the channel's client script into `index.htm`
//! documents. The HTTP listener itself lives in `livehost-cli`.
//!
//! ```no_run
//! use livehost::{ChangeDetector, Notifier, PullChannel, DEFAULT_SENTINEL_PREFIX};
//! use std::sync::Arc;
//!
//! let notifier = Notifier::Pull(Arc::new(PullChannel::new(DEFAULT_SENTINEL_PREFIX, 1000)));
//! let detector = ChangeDetector::new("./site", notifier.channel());
//! detector.tick();
//! ```

pub mod channel;
pub mod detector;
pub mod error;
pub mod mime;
pub mod registry;
pub mod request;
pub mod responder;
pub mod script;
pub mod signature;
pub mod snapshot;

pub use channel::{
    NotificationChannel, Notifier, PollStatus, PullChannel, PushChannel, PushReceiver,
    PushSession, Strategy, DEFAULT_PUSH_ENDPOINT, DEFAULT_RELOAD_MESSAGE, DEFAULT_SENTINEL_PREFIX,
};
pub use detector::{ChangeDetector, TickOutcome, DEFAULT_SCAN_INTERVAL};
pub use error::{RegistryError, ServeError, SessionError, SnapshotError};
pub use mime::{MimeLookup, MimeTable};
pub use registry::{
    BroadcastReport, ConnectionRegistry, RegistryStats, Session, SessionGuard, SessionHandle,
};
pub use request::INDEX_DOCUMENT;
pub use responder::{StaticFile, StaticResponder};
pub use signature::Signature;
pub use snapshot::{SnapshotEntry, TreeSnapshot};

/// Result alias for file serving.
pub type Result<T, E = ServeError> = std::result::Result<T, E>;
