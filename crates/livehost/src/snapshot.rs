//! Directory tree snapshots.
//!
//! A snapshot is the ordered list of files (with modification times) and
//! directory markers under a root. Comparing two snapshots element by element
//! is how the detector decides whether anything changed.
//!
//! # Ordering
//!
//! Within each directory, files come first in raw enumeration order, then
//! subdirectories (each followed by its own subtree) in raw enumeration order.
//! The walk never sorts, so the order is whatever the filesystem reports. It is
//! stable for an unchanged directory on the same filesystem, which is all the
//! detector needs.

use crate::error::SnapshotError;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// One element of a [`TreeSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SnapshotEntry {
    /// A regular file and its modification time in whole seconds since the epoch.
    File { name: String, modified: u64 },
    /// A directory marker; its contents follow in the sequence.
    Directory { name: String },
}

impl SnapshotEntry {
    /// Entry name (no path).
    pub fn name(&self) -> &str {
        match self {
            SnapshotEntry::File { name, .. } | SnapshotEntry::Directory { name } => name,
        }
    }
}

/// Point-in-time structural and timestamp view of a directory tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TreeSnapshot {
    entries: Vec<SnapshotEntry>,
}

impl TreeSnapshot {
    /// Walk `root` and capture its current state.
    ///
    /// # Errors
    ///
    /// Fails if the root or any directory beneath it cannot be enumerated, or
    /// if an entry's metadata cannot be read.
    pub fn capture(root: &Path) -> Result<Self, SnapshotError> {
        let mut entries = Vec::new();
        walk(root, &mut entries)?;
        Ok(Self { entries })
    }

    /// Build a snapshot from already-collected entries.
    pub fn from_entries(entries: Vec<SnapshotEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[SnapshotEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialized form used for digests: `name/<secs>|` per file, `name|` per
    /// directory.
    pub fn serialize(&self) -> String {
        let mut out = String::with_capacity(self.entries.len() * 24);
        for entry in &self.entries {
            match entry {
                SnapshotEntry::File { name, modified } => {
                    let _ = write!(out, "{}/{}|", name, modified);
                }
                SnapshotEntry::Directory { name } => {
                    out.push_str(name);
                    out.push('|');
                }
            }
        }
        out
    }
}

/// Names starting with `.` or `_` are left out of snapshots, subtree included.
pub fn is_excluded(name: &str) -> bool {
    name.starts_with('.') || name.starts_with('_')
}

fn walk(dir: &Path, entries: &mut Vec<SnapshotEntry>) -> Result<(), SnapshotError> {
    let read_dir = fs::read_dir(dir).map_err(|source| SnapshotError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut subdirs = Vec::new();

    for item in read_dir {
        let item = item.map_err(|source| SnapshotError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let name = item.file_name().to_string_lossy().into_owned();
        if is_excluded(&name) {
            continue;
        }

        let path = item.path();
        let file_type = item.file_type().map_err(|source| SnapshotError::Metadata {
            path: path.clone(),
            source,
        })?;

        if file_type.is_dir() {
            subdirs.push((name, path));
            continue;
        }

        // Symlinks resolve to their target; links to directories are not descended.
        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            // Dangling link.
            Err(_) if file_type.is_symlink() => continue,
            Err(source) => return Err(SnapshotError::Metadata { path, source }),
        };
        if !metadata.is_file() {
            continue;
        }

        let modified = metadata.modified().map(to_unix_seconds).unwrap_or(0);
        entries.push(SnapshotEntry::File { name, modified });
    }

    for (name, path) in subdirs {
        entries.push(SnapshotEntry::Directory { name });
        walk(&path, entries)?;
    }

    Ok(())
}

fn to_unix_seconds(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
