use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Attachment not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl StorageError {
    /// Wraps an I/O error, mapping `NotFound` to the dedicated variant.
    pub fn from_io(path: &Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            StorageError::NotFound(path.display().to_string())
        } else {
            StorageError::Io(err)
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound(_))
    }
}

/// Port for the directory holding attachment blobs.
///
/// The layout is flat: every blob is a regular file directly inside the root.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AttachmentDirectory: Send + Sync {
    /// Resolve the configured root to its canonical form
    async fn canonical_root(&self) -> Result<PathBuf, StorageError>;

    /// List regular files directly inside the root (no recursion).
    /// Returned paths are joined onto the configured root, not resolved.
    async fn list_files(&self) -> Result<Vec<PathBuf>, StorageError>;

    /// Resolve symlinks and relative components of an existing path
    async fn canonicalize(&self, path: &Path) -> Result<PathBuf, StorageError>;

    /// Check if a file exists
    async fn exists(&self, path: &Path) -> Result<bool, StorageError>;

    /// Remove a single file
    async fn remove(&self, path: &Path) -> Result<(), StorageError>;
}
