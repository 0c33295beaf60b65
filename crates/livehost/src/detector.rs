//! Periodic change detection.
//!
//! Each tick captures a fresh [`TreeSnapshot`], compares it with the stored
//! one and, if they differ, stores the new one and notifies the channel once.
//! Snapshot failures leave the stored snapshot in place; the next tick tries
//! again.

use crate::channel::NotificationChannel;
use crate::snapshot::TreeSnapshot;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

/// Default scan interval.
pub const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_millis(500);

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The tree matches the stored snapshot.
    Unchanged,
    /// The tree changed and the channel was notified.
    Changed,
    /// The snapshot could not be taken; nothing was compared.
    Skipped,
}

/// Compares successive snapshots of a root directory.
pub struct ChangeDetector {
    root: PathBuf,
    current: Mutex<TreeSnapshot>,
    channel: Arc<dyn NotificationChannel>,
}

impl ChangeDetector {
    /// Take the baseline snapshot and hand it to `channel` without notifying.
    ///
    /// An unreadable root starts the detector from an empty snapshot.
    pub fn new(root: impl Into<PathBuf>, channel: Arc<dyn NotificationChannel>) -> Self {
        let root = root.into();
        let baseline = TreeSnapshot::capture(&root).unwrap_or_else(|e| {
            tracing::warn!("Initial snapshot failed, starting empty: {}", e);
            TreeSnapshot::default()
        });
        channel.baseline(&baseline);

        Self {
            root,
            current: Mutex::new(baseline),
            channel,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Copy of the stored snapshot.
    pub fn snapshot(&self) -> TreeSnapshot {
        self.current.lock().clone()
    }

    /// Run one comparison.
    pub fn tick(&self) -> TickOutcome {
        let fresh = match TreeSnapshot::capture(&self.root) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!("Skipping change detection: {}", e);
                return TickOutcome::Skipped;
            }
        };

        {
            let mut current = self.current.lock();
            if *current == fresh {
                return TickOutcome::Unchanged;
            }
            *current = fresh.clone();
        }

        tracing::info!("File system change detected");
        self.channel.notify(&fresh);
        TickOutcome::Changed
    }

    /// Tick every `interval` until `shutdown` turns true or its sender is
    /// dropped.
    pub async fn run(self: Arc<Self>, interval: Duration, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The baseline was taken at construction.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let detector = Arc::clone(&self);
                    if let Err(e) = tokio::task::spawn_blocking(move || detector.tick()).await {
                        tracing::error!("Change detection task failed: {}", e);
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        tracing::debug!("change detector stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::Strategy;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingChannel {
        baselines: AtomicUsize,
        notifications: AtomicUsize,
    }

    impl NotificationChannel for RecordingChannel {
        fn baseline(&self, _snapshot: &TreeSnapshot) {
            self.baselines.fetch_add(1, Ordering::SeqCst);
        }

        fn notify(&self, _snapshot: &TreeSnapshot) {
            self.notifications.fetch_add(1, Ordering::SeqCst);
        }

        fn client_script(&self) -> String {
            String::new()
        }

        fn strategy(&self) -> Strategy {
            Strategy::Pull
        }
    }

    fn touch(path: &Path, secs: u64) {
        let file = fs::File::options().write(true).open(path).unwrap();
        file.set_modified(UNIX_EPOCH + Duration::from_secs(secs))
            .unwrap();
    }

    #[test]
    fn test_baseline_does_not_notify() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("index.htm"), "x").unwrap();
        let channel = Arc::new(RecordingChannel::default());

        let detector = ChangeDetector::new(temp.path(), channel.clone());

        assert_eq!(channel.baselines.load(Ordering::SeqCst), 1);
        assert_eq!(channel.notifications.load(Ordering::SeqCst), 0);
        assert_eq!(detector.snapshot().len(), 1);
    }

    #[test]
    fn test_unchanged_tree_emits_nothing() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("index.htm"), "x").unwrap();
        let channel = Arc::new(RecordingChannel::default());
        let detector = ChangeDetector::new(temp.path(), channel.clone());

        assert_eq!(detector.tick(), TickOutcome::Unchanged);
        assert_eq!(detector.tick(), TickOutcome::Unchanged);
        assert_eq!(channel.notifications.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_many_changes_emit_one_event_per_tick() {
        let temp = TempDir::new().unwrap();
        for name in ["a.txt", "b.txt", "c.txt"] {
            fs::write(temp.path().join(name), "x").unwrap();
            touch(&temp.path().join(name), 1_000);
        }
        let channel = Arc::new(RecordingChannel::default());
        let detector = ChangeDetector::new(temp.path(), channel.clone());

        for name in ["a.txt", "b.txt", "c.txt"] {
            touch(&temp.path().join(name), 2_000);
        }
        fs::write(temp.path().join("d.txt"), "new").unwrap();

        assert_eq!(detector.tick(), TickOutcome::Changed);
        assert_eq!(channel.notifications.load(Ordering::SeqCst), 1);
        assert_eq!(detector.tick(), TickOutcome::Unchanged);
        assert_eq!(channel.notifications.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_missing_root_is_skipped_then_recovers() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("site");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("index.htm"), "x").unwrap();
        let channel = Arc::new(RecordingChannel::default());
        let detector = ChangeDetector::new(&root, channel.clone());
        let before = detector.snapshot();

        fs::remove_dir_all(&root).unwrap();
        assert_eq!(detector.tick(), TickOutcome::Skipped);
        assert_eq!(detector.snapshot(), before);

        fs::create_dir(&root).unwrap();
        fs::write(root.join("other.htm"), "y").unwrap();
        assert_eq!(detector.tick(), TickOutcome::Changed);
        assert_eq!(channel.notifications.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unreadable_root_starts_empty() {
        let temp = TempDir::new().unwrap();
        let channel = Arc::new(RecordingChannel::default());
        let detector = ChangeDetector::new(temp.path().join("missing"), channel);
        assert!(detector.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown() {
        let temp = TempDir::new().unwrap();
        let channel = Arc::new(RecordingChannel::default());
        let detector = Arc::new(ChangeDetector::new(temp.path(), channel.clone()));
        let (tx, rx) = watch::channel(false);

        let task = tokio::spawn(Arc::clone(&detector).run(Duration::from_millis(10), rx));
        fs::write(temp.path().join("late.txt"), "x").unwrap();

        let deadline = SystemTime::now() + Duration::from_secs(5);
        while channel.notifications.load(Ordering::SeqCst) == 0 && SystemTime::now() < deadline {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(channel.notifications.load(Ordering::SeqCst), 1);

        tx.send(true).unwrap();
        tokio::time::timeout(Duration::from_secs(5), task)
            .await
            .expect("detector should stop")
            .unwrap();
    }
}
