//! Request path validation and resolution.
//!
//! Paths are checked after percent-decoding and before touching the
//! filesystem. Only plain relative paths made of `[a-zA-Z0-9-_./]` with no
//! dot-prefixed or empty segments get through, which keeps every resolved
//! file under the served root.

use crate::error::ServeError;
use std::path::{Path, PathBuf};

/// Document served for empty paths and directory requests.
pub const INDEX_DOCUMENT: &str = "index.htm";

/// Strip the leading `/` from a raw URI path and percent-decode it.
///
/// An empty or all-whitespace result becomes [`INDEX_DOCUMENT`].
pub fn decode_path(raw: &str) -> Result<String, ServeError> {
    let trimmed = raw.strip_prefix('/').unwrap_or(raw);
    let decoded = urlencoding::decode(trimmed).map_err(|_| ServeError::InvalidPath {
        path: raw.to_string(),
        reason: "not valid percent-encoded UTF-8",
    })?;

    if decoded.trim().is_empty() {
        Ok(INDEX_DOCUMENT.to_string())
    } else {
        Ok(decoded.into_owned())
    }
}

/// Reject anything that is not a plain relative path.
pub fn validate_path(path: &str) -> Result<(), ServeError> {
    let reason = if path.is_empty() {
        Some("empty path")
    } else if path.starts_with('.') {
        Some("leading dot")
    } else if path.ends_with('.') {
        Some("trailing dot")
    } else if path.contains("..") {
        Some("parent directory reference")
    } else if path.contains("./") || path.contains("/.") {
        Some("dot-prefixed segment")
    } else if path.starts_with('/') {
        Some("leading slash")
    } else if path.ends_with('/') {
        Some("trailing slash")
    } else if path.contains("//") {
        Some("empty segment")
    } else if !path.chars().all(is_allowed_char) {
        Some("disallowed character")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ServeError::InvalidPath {
            path: path.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/')
}

/// Map a validated path onto a file under `root`.
///
/// A path that does not name a file falls back to its `index.htm`, unless it
/// already ends in `index.htm`.
pub async fn resolve(root: &Path, path: &str) -> Result<PathBuf, ServeError> {
    let mut candidate = root.to_path_buf();
    candidate.extend(path.split('/'));

    if !is_file(&candidate).await && !path.ends_with(INDEX_DOCUMENT) {
        candidate.push(INDEX_DOCUMENT);
    }

    if is_file(&candidate).await {
        Ok(candidate)
    } else {
        Err(ServeError::NotFound(path.to_string()))
    }
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn rejected(path: &str) -> bool {
        matches!(validate_path(path), Err(ServeError::InvalidPath { .. }))
    }

    #[test]
    fn test_validation_rules() {
        assert!(validate_path("a/b.txt").is_ok());
        assert!(validate_path("index.htm").is_ok());
        assert!(validate_path("css/site-v2_min.css").is_ok());

        assert!(rejected("../etc/passwd"));
        assert!(rejected("a//b"));
        assert!(rejected(".env"));
        assert!(rejected("a/.git/config"));
        assert!(rejected("a/b."));
        assert!(rejected("/abs"));
        assert!(rejected("dir/"));
        assert!(rejected("a/../b"));
        assert!(rejected("a b.htm"));
        assert!(rejected("a?b=1"));
        assert!(rejected("caf\u{e9}.htm"));
        assert!(rejected("a\\b"));
    }

    #[test]
    fn test_decode_path() {
        assert_eq!(decode_path("/").unwrap(), "index.htm");
        assert_eq!(decode_path("").unwrap(), "index.htm");
        assert_eq!(decode_path("/%20").unwrap(), "index.htm");
        assert_eq!(decode_path("/a/b.txt").unwrap(), "a/b.txt");
        assert_eq!(decode_path("/%2E%2E/secret").unwrap(), "../secret");
        assert!(decode_path("/%FF").is_err());
    }

    #[test]
    fn test_encoded_traversal_is_rejected_after_decoding() {
        let decoded = decode_path("/%2e%2e%2fetc%2fpasswd").unwrap();
        assert!(rejected(&decoded));
    }

    #[tokio::test]
    async fn test_resolve_file_and_directory_index() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("docs")).unwrap();
        fs::write(temp.path().join("docs/index.htm"), "docs").unwrap();
        fs::write(temp.path().join("a.txt"), "a").unwrap();

        let file = resolve(temp.path(), "a.txt").await.unwrap();
        assert_eq!(file, temp.path().join("a.txt"));

        let index = resolve(temp.path(), "docs").await.unwrap();
        assert_eq!(index, temp.path().join("docs").join("index.htm"));
    }

    #[tokio::test]
    async fn test_resolve_missing() {
        let temp = TempDir::new().unwrap();
        let err = resolve(temp.path(), "index.htm").await.unwrap_err();
        assert!(matches!(err, ServeError::NotFound(_)));

        let err = resolve(temp.path(), "nothing/here").await.unwrap_err();
        assert_eq!(err.status(), 404);
    }
}
