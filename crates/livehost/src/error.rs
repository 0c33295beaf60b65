//! Error types for the live-reload core.
//!
//! Each subsystem gets its own enum so callers can decide how a failure
//! surfaces: request errors map to HTTP status codes, snapshot errors are
//! swallowed by the detector, session and registry errors are logged.

use std::path::PathBuf;
use thiserror::Error;

/// Failure while capturing a [`TreeSnapshot`](crate::TreeSnapshot).
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The root (or a directory inside it) could not be enumerated.
    #[error("Failed to read directory {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Metadata for an entry could not be read.
    #[error("Failed to read metadata for {}: {source}", .path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors produced while answering a static file request.
///
/// Every variant maps onto exactly one HTTP status via [`ServeError::status`].
#[derive(Debug, Error)]
pub enum ServeError {
    /// Only GET is served.
    #[error("Method not allowed: {0}")]
    Method(String),

    /// The request path failed validation.
    #[error("Invalid request path '{path}': {reason}")]
    InvalidPath { path: String, reason: &'static str },

    /// No file exists at the resolved location.
    #[error("File not found: {0}")]
    NotFound(String),

    /// The file exists but its extension has no known MIME type.
    #[error("Unsupported file type '{extension}' for {path}")]
    UnsupportedType { path: String, extension: String },

    /// The file was resolved but could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ServeError {
    /// HTTP status code for this error.
    pub fn status(&self) -> u16 {
        match self {
            ServeError::Method(_) | ServeError::InvalidPath { .. } => 400,
            ServeError::UnsupportedType { .. } => 403,
            ServeError::NotFound(_) => 404,
            ServeError::Read { .. } => 500,
        }
    }

    /// Returns true for client-side validation failures.
    pub fn is_validation(&self) -> bool {
        matches!(self, ServeError::Method(_) | ServeError::InvalidPath { .. })
    }
}

/// Failure delivering a message to one session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The session's connection task has gone away.
    #[error("Session closed")]
    Closed,

    /// The session's outbound queue is full.
    #[error("Session queue is full")]
    Backpressure,

    /// Transport-level failure on the persistent connection.
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Misuse of the connection registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The handle no longer refers to a live session (already deregistered).
    #[error("Stale session handle (slot {index}, generation {generation})")]
    StaleHandle { index: usize, generation: u64 },
}
