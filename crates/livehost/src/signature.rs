//! Compact snapshot digests for the pull endpoint.

use crate::snapshot::TreeSnapshot;
use std::fmt;

/// BLAKE3 digest of a snapshot's serialized form, as lowercase hex.
///
/// Used as an opaque token in the sentinel URL; clients echo it back and the
/// server compares it against the current one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature(String);

impl Signature {
    /// Digest a snapshot.
    pub fn of(snapshot: &TreeSnapshot) -> Self {
        let hash = blake3::hash(snapshot.serialize().as_bytes());
        Self(hash.to_hex().to_string())
    }

    /// Wrap an existing token without hashing it.
    pub fn from_token(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compare against a token submitted by a client.
    pub fn matches(&self, submitted: &str) -> bool {
        self.0 == submitted
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::SnapshotEntry;

    fn snapshot(modified: u64) -> TreeSnapshot {
        TreeSnapshot::from_entries(vec![SnapshotEntry::File {
            name: "index.htm".into(),
            modified,
        }])
    }

    #[test]
    fn test_equal_snapshots_share_signature() {
        assert_eq!(Signature::of(&snapshot(1)), Signature::of(&snapshot(1)));
    }

    #[test]
    fn test_changed_mtime_changes_signature() {
        assert_ne!(Signature::of(&snapshot(1)), Signature::of(&snapshot(2)));
    }

    #[test]
    fn test_signature_is_hex_and_fixed_size() {
        let sig = Signature::of(&TreeSnapshot::default());
        assert_eq!(sig.as_str().len(), 64);
        assert!(sig.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        assert!(sig.matches(sig.as_str()));
        assert!(!sig.matches("xyz"));
    }
}
