use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Attachment path must be absolute: {0}")]
    RelativeAttachmentPath(PathBuf),

    #[error("Invalid attachment reference: {0}")]
    InvalidReference(String),

    #[error("Invalid SQL identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Invalid path matching policy: {0}")]
    InvalidPathMatching(String),
}
