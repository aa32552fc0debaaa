use thiserror::Error;

use crate::application::ports::RepositoryError;

/// Errors that abort a reclamation pass.
///
/// Everything else (unreadable directory, unresolvable entries, files that
/// vanished before disposal) degrades into the report counts instead.
#[derive(Debug, Error)]
pub enum ReclaimError {
    /// The reference table could not be read. Proceeding would make every
    /// scanned blob look orphaned.
    #[error("Failed to read attachment references from {source_column}: {source}")]
    ReferenceQuery {
        source_column: String,
        #[source]
        source: RepositoryError,
    },
}

/// Result type for reclamation operations
pub type ReclaimResult<T> = Result<T, ReclaimError>;

impl ReclaimError {
    pub fn reference_query(source_column: impl Into<String>, source: RepositoryError) -> Self {
        Self::ReferenceQuery {
            source_column: source_column.into(),
            source,
        }
    }
}
