//! Static file responses.

use crate::error::ServeError;
use crate::mime::{MimeLookup, MimeTable};
use crate::request::{self, INDEX_DOCUMENT};
use crate::script::inject_script;
use std::path::{Path, PathBuf};

/// A file ready to be sent with status 200.
#[derive(Debug, Clone)]
pub struct StaticFile {
    /// Decoded request path (after index defaulting).
    pub request_path: String,
    /// Location on disk.
    pub file: PathBuf,
    pub content_type: String,
    pub body: Vec<u8>,
    /// Whether the reload script was injected.
    pub injected: bool,
}

/// Serves files under a root directory.
///
/// Every `index.htm` it serves gets the notification client script inserted
/// before its closing body tag.
pub struct StaticResponder<M = MimeTable> {
    root: PathBuf,
    mime: M,
}

impl StaticResponder<MimeTable> {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_mime(root, MimeTable)
    }
}

impl<M: MimeLookup> StaticResponder<M> {
    pub fn with_mime(root: impl Into<PathBuf>, mime: M) -> Self {
        Self {
            root: root.into(),
            mime,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Answer a request.
    ///
    /// `raw_path` is the undecoded URI path. `script` is only called when the
    /// resolved file is a root document.
    ///
    /// # Errors
    ///
    /// - [`ServeError::Method`] / [`ServeError::InvalidPath`] → 400
    /// - [`ServeError::UnsupportedType`] → 403
    /// - [`ServeError::NotFound`] → 404
    /// - [`ServeError::Read`] → 500
    pub async fn respond<F>(
        &self,
        method: &str,
        raw_path: &str,
        script: F,
    ) -> Result<StaticFile, ServeError>
    where
        F: FnOnce() -> String,
    {
        if !method.eq_ignore_ascii_case("GET") {
            return Err(ServeError::Method(method.to_string()));
        }

        let request_path = request::decode_path(raw_path)?;
        request::validate_path(&request_path)?;
        let file = request::resolve(&self.root, &request_path).await?;

        let extension = file
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let content_type = self
            .mime
            .mime_type(&extension)
            .ok_or_else(|| ServeError::UnsupportedType {
                path: request_path.clone(),
                extension: extension.clone(),
            })?
            .to_string();

        let body = tokio::fs::read(&file)
            .await
            .map_err(|source| ServeError::Read {
                path: file.clone(),
                source,
            })?;

        let is_root_document = file
            .file_name()
            .is_some_and(|name| name == INDEX_DOCUMENT);
        let (body, injected) = if is_root_document {
            (inject_script(&body, &script()), true)
        } else {
            (body, false)
        };

        Ok(StaticFile {
            request_path,
            file,
            content_type,
            body,
            injected,
        })
    }
}
