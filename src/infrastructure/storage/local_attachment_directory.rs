use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::application::ports::{AttachmentDirectory, StorageError};

/// Attachment directory on the local filesystem
pub struct LocalAttachmentDirectory {
    root: PathBuf,
}

impl LocalAttachmentDirectory {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

#[async_trait]
impl AttachmentDirectory for LocalAttachmentDirectory {
    async fn canonical_root(&self) -> Result<PathBuf, StorageError> {
        fs::canonicalize(&self.root)
            .await
            .map_err(|e| StorageError::from_io(&self.root, e))
    }

    async fn list_files(&self) -> Result<Vec<PathBuf>, StorageError> {
        let mut entries = fs::read_dir(&self.root)
            .await
            .map_err(|e| StorageError::from_io(&self.root, e))?;

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            // metadata() follows symlinks, so a link to a blob counts as a file
            match fs::metadata(&path).await {
                Ok(metadata) if metadata.is_file() => files.push(path),
                Ok(_) => debug!(path = %path.display(), "Ignoring non-regular directory entry"),
                // Dangling link or racing delete; let canonicalization report it
                Err(_) => files.push(path),
            }
        }

        Ok(files)
    }

    async fn canonicalize(&self, path: &Path) -> Result<PathBuf, StorageError> {
        fs::canonicalize(path)
            .await
            .map_err(|e| StorageError::from_io(path, e))
    }

    async fn exists(&self, path: &Path) -> Result<bool, StorageError> {
        Ok(fs::try_exists(path).await?)
    }

    async fn remove(&self, path: &Path) -> Result<(), StorageError> {
        fs::remove_file(path)
            .await
            .map_err(|e| StorageError::from_io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_canonical_root_resolves_relative_components() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("app_parts")).unwrap();
        let root = dir.path().join("app_parts").join("..").join("app_parts");

        let directory = LocalAttachmentDirectory::new(root);

        assert_eq!(
            directory.canonical_root().await.unwrap(),
            dir.path().join("app_parts").canonicalize().unwrap()
        );
    }

    #[tokio::test]
    async fn test_missing_root_is_not_found() {
        let dir = TempDir::new().unwrap();
        let directory = LocalAttachmentDirectory::new(dir.path().join("absent"));

        let err = directory.canonical_root().await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_list_files_is_flat() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("PART_1"), b"one").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub").join("PART_2"), b"two").unwrap();

        let directory = LocalAttachmentDirectory::new(dir.path().to_path_buf());
        let files = directory.list_files().await.unwrap();

        assert_eq!(files, vec![dir.path().join("PART_1")]);
    }

    #[tokio::test]
    async fn test_list_missing_directory_is_not_found() {
        let dir = TempDir::new().unwrap();
        let directory = LocalAttachmentDirectory::new(dir.path().join("missing"));

        let err = directory.list_files().await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_exists_and_remove() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("PART_1");
        std::fs::write(&path, b"payload").unwrap();

        let directory = LocalAttachmentDirectory::new(dir.path().to_path_buf());
        assert!(directory.exists(&path).await.unwrap());

        directory.remove(&path).await.unwrap();
        assert!(!directory.exists(&path).await.unwrap());

        let err = directory.remove(&path).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
