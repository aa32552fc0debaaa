use async_trait::async_trait;
use thiserror::Error;

use crate::domain::value_objects::{AttachmentReference, ReferenceColumn};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Receives references one at a time while the store drains its cursor.
#[async_trait]
pub trait ReferenceSink: Send {
    async fn accept(&mut self, reference: AttachmentReference);
}

/// Port for the relational table recording where attachments live.
///
/// Read-only: nothing in the reclamation pass writes through this port.
#[async_trait]
pub trait ReferenceStore: Send + Sync {
    /// Table and column the references are read from
    fn source(&self) -> &ReferenceColumn;

    /// Stream every non-null, non-empty reference into `sink` inside one
    /// read transaction. Returns the number of references delivered.
    ///
    /// The transaction and its connection are released before returning,
    /// on success and on error alike.
    async fn visit_references(&self, sink: &mut dyn ReferenceSink) -> Result<u64, RepositoryError>;

    /// Cheap connectivity check
    async fn ping(&self) -> Result<(), RepositoryError>;
}
