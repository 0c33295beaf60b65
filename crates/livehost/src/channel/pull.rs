use super::{NotificationChannel, Strategy};
use crate::script::pull_script;
use crate::signature::Signature;
use crate::snapshot::TreeSnapshot;
use parking_lot::RwLock;

/// Default first path segment of the sentinel URL.
pub const DEFAULT_SENTINEL_PREFIX: &str = "10C20077DAFE49EDA3FBE97A955F2B6E";

/// Answer to a sentinel poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStatus {
    /// The submitted signature is current.
    Current,
    /// The tree changed since the page was served; the client should reload.
    Stale,
}

impl PollStatus {
    /// 200 for current, 202 for stale.
    pub fn status(&self) -> u16 {
        match self {
            PollStatus::Current => 200,
            PollStatus::Stale => 202,
        }
    }
}

/// Pull delivery: keeps the current signature for clients to poll against.
pub struct PullChannel {
    prefix: String,
    poll_interval_ms: u64,
    signature: RwLock<Signature>,
}

impl PullChannel {
    pub fn new(prefix: impl Into<String>, poll_interval_ms: u64) -> Self {
        Self {
            prefix: prefix.into(),
            poll_interval_ms,
            signature: RwLock::new(Signature::of(&TreeSnapshot::default())),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn current(&self) -> Signature {
        self.signature.read().clone()
    }

    /// Replace the current signature.
    pub fn set_signature(&self, signature: Signature) {
        *self.signature.write() = signature;
    }

    /// Sentinel URL for the current signature.
    pub fn address(&self) -> String {
        format!("/{}/{}", self.prefix, self.signature.read())
    }

    /// Compare a client-submitted signature with the current one.
    pub fn check(&self, submitted: &str) -> PollStatus {
        if self.signature.read().matches(submitted) {
            PollStatus::Current
        } else {
            PollStatus::Stale
        }
    }

    /// Answer `path` if it addresses the sentinel, `None` otherwise.
    ///
    /// `path` is the request path with or without its leading `/`. A bare
    /// prefix without a signature segment is stale.
    pub fn poll(&self, path: &str) -> Option<PollStatus> {
        let path = path.strip_prefix('/').unwrap_or(path);
        let rest = path.strip_prefix(self.prefix.as_str())?;
        if rest.is_empty() {
            return Some(PollStatus::Stale);
        }
        let rest = rest.strip_prefix('/')?;
        let submitted = rest.split('/').next().unwrap_or_default();
        Some(self.check(submitted))
    }
}

impl NotificationChannel for PullChannel {
    fn baseline(&self, snapshot: &TreeSnapshot) {
        self.set_signature(Signature::of(snapshot));
    }

    fn notify(&self, snapshot: &TreeSnapshot) {
        let signature = Signature::of(snapshot);
        tracing::debug!(signature = %signature, "signature updated");
        self.set_signature(signature);
    }

    fn client_script(&self) -> String {
        pull_script(&self.address(), self.poll_interval_ms)
    }

    fn strategy(&self) -> Strategy {
        Strategy::Pull
    }
}
