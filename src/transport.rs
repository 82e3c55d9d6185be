//! File transport used by the document pipeline.
//!
//! The engine never talks to a document store itself; it downloads and
//! uploads workbook bytes through a [`FileTransport`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{ExportError, ExportResult};

/// Moves workbook bytes to and from a document store.
#[async_trait]
pub trait FileTransport: Send + Sync {
    /// Fetches the document at `path`.
    async fn download_file(&self, path: &str) -> ExportResult<Vec<u8>>;

    /// Stores `bytes` at `path`.
    ///
    /// Returns `Ok(false)` when the store declines the upload.
    async fn upload_file(&self, path: &str, bytes: Vec<u8>) -> ExportResult<bool>;
}

/// A transport that keeps documents in memory, keyed by path.
///
/// # Example
///
/// ```
/// use srs_export::transport::{FileTransport, MemoryTransport};
///
/// let runtime = tokio::runtime::Runtime::new().unwrap();
/// runtime.block_on(async {
///     let transport = MemoryTransport::new().with_file("srs/jan.xlsx", vec![1, 2, 3]);
///     assert_eq!(transport.download_file("srs/jan.xlsx").await.unwrap(), vec![1, 2, 3]);
/// });
/// ```
#[derive(Debug, Default)]
pub struct MemoryTransport {
    files: RwLock<HashMap<String, Vec<u8>>>,
    reject_uploads: AtomicBool,
}

impl MemoryTransport {
    /// Creates an empty transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document.
    pub fn with_file(self, path: impl Into<String>, bytes: Vec<u8>) -> Self {
        let mut files = self.files.into_inner();
        files.insert(path.into(), bytes);
        Self {
            files: RwLock::new(files),
            reject_uploads: self.reject_uploads,
        }
    }

    /// Makes every later upload return `Ok(false)`.
    pub fn reject_uploads(&self, reject: bool) {
        self.reject_uploads.store(reject, Ordering::SeqCst);
    }

    /// Returns a copy of the stored document.
    pub async fn file(&self, path: &str) -> Option<Vec<u8>> {
        self.files.read().await.get(path).cloned()
    }
}

#[async_trait]
impl FileTransport for MemoryTransport {
    async fn download_file(&self, path: &str) -> ExportResult<Vec<u8>> {
        self.files
            .read()
            .await
            .get(path)
            .cloned()
            .ok_or_else(|| ExportError::DownloadFailed {
                path: path.to_string(),
                message: "no such document".to_string(),
            })
    }

    async fn upload_file(&self, path: &str, bytes: Vec<u8>) -> ExportResult<bool> {
        if self.reject_uploads.load(Ordering::SeqCst) {
            tracing::warn!(path = %path, "upload rejected");
            return Ok(false);
        }
        self.files.write().await.insert(path.to_string(), bytes);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upload_then_download() {
        let transport = MemoryTransport::new();

        assert!(transport.upload_file("a.xlsx", vec![7]).await.unwrap());
        assert_eq!(transport.download_file("a.xlsx").await.unwrap(), vec![7]);
    }

    #[tokio::test]
    async fn test_missing_document_is_download_error() {
        let transport = MemoryTransport::new();

        match transport.download_file("missing.xlsx").await {
            Err(ExportError::DownloadFailed { path, .. }) => assert_eq!(path, "missing.xlsx"),
            other => panic!("Expected DownloadFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rejected_upload_keeps_old_bytes() {
        let transport = MemoryTransport::new().with_file("a.xlsx", vec![1]);
        transport.reject_uploads(true);

        assert!(!transport.upload_file("a.xlsx", vec![2]).await.unwrap());
        assert_eq!(transport.file("a.xlsx").await, Some(vec![1]));
    }

    #[test]
    fn test_transport_is_object_safe() {
        fn assert_object(_: &dyn FileTransport) {}
        assert_object(&MemoryTransport::new());
    }
}
