//! Transport to the mentor service.
//!
//! Two calls exist: `ask` relays a text message and returns the answer,
//! `upload` sends a single file and reports whether the service accepted
//! it. [`HttpTransport`] talks to the real service; tests substitute their
//! own implementations of [`Transport`].

mod http;

pub use http::HttpTransport;

use std::future::Future;
use std::path::{Path, PathBuf};

/// A file selected for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    path: PathBuf,
    name: String,
}

impl UploadFile {
    /// Create an upload for the file at `path`.
    ///
    /// The display name is the final path component.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.file_name().map_or_else(
            || path.display().to_string(),
            |n| n.to_string_lossy().into_owned(),
        );
        Self { path, name }
    }

    /// Path the bytes are read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name shown to the user and sent in the multipart part.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Outcome reported by the service for an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadStatus {
    /// The service answered `{"status": "success"}`.
    Success,
    /// Any other status value.
    Rejected(String),
}

impl UploadStatus {
    /// Interpret the raw `status` field of an upload response.
    pub fn from_status(status: &str) -> Self {
        if status == "success" {
            Self::Success
        } else {
            Self::Rejected(status.to_string())
        }
    }
}

/// A client for the mentor service.
pub trait Transport: Send + Sync {
    /// Send a text message and return the service's answer.
    fn ask(&self, message: &str) -> impl Future<Output = Result<String, TransportError>> + Send;

    /// Upload one file.
    fn upload(
        &self,
        file: &UploadFile,
    ) -> impl Future<Output = Result<UploadStatus, TransportError>> + Send;
}

/// Errors that can occur while talking to the service.
///
/// The variants only matter for logs; the UI shows one fallback message
/// for all of them.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Connecting, sending, or reading the body failed.
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Service returned status {0}")]
    Status(reqwest::StatusCode),

    /// The body was not the expected JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// The file to upload could not be read.
    #[error("Could not read {}: {source}", path.display())]
    File {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
