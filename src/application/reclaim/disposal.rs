use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::reconciler::OrphanSet;
use crate::application::ports::AttachmentDirectory;
use crate::domain::value_objects::{AttachmentPath, ExecutionMode};

/// What happened to a single orphan candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisposalAction {
    /// File removed
    Deleted,
    /// File present; dry run left it in place
    WouldDelete,
    /// File already gone
    Missing,
    /// Candidate not directly inside the attachment directory
    Refused,
    /// Removal or existence check failed
    Failed,
}

/// Tally of a disposal run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DisposalOutcome {
    /// Orphans deleted, or that would have been deleted in a dry run
    pub disposed: usize,
    pub missing: usize,
    pub refused: usize,
    pub failed: usize,
}

impl DisposalOutcome {
    fn record(&mut self, action: DisposalAction) {
        match action {
            DisposalAction::Deleted | DisposalAction::WouldDelete => self.disposed += 1,
            DisposalAction::Missing => self.missing += 1,
            DisposalAction::Refused => self.refused += 1,
            DisposalAction::Failed => self.failed += 1,
        }
    }
}

/// Deletes (or pretends to delete) orphaned attachments.
///
/// Only files directly inside the canonical attachment root are ever touched.
/// In [`ExecutionMode::Simulate`] the directory port is only queried, never
/// asked to remove anything.
pub struct DisposalExecutor {
    directory: Arc<dyn AttachmentDirectory>,
}

impl DisposalExecutor {
    pub fn new(directory: Arc<dyn AttachmentDirectory>) -> Self {
        Self { directory }
    }

    pub async fn dispose(
        &self,
        orphans: &OrphanSet,
        root: &Path,
        mode: ExecutionMode,
    ) -> DisposalOutcome {
        let mut outcome = DisposalOutcome::default();
        if orphans.is_empty() {
            return outcome;
        }

        let mut candidates: Vec<&AttachmentPath> = orphans.iter().collect();
        candidates.sort();

        for candidate in candidates {
            let action = self.dispose_one(candidate, root, mode).await;
            outcome.record(action);
        }

        info!(
            "Disposal ({}) finished: {} disposed, {} missing, {} refused, {} failed",
            mode, outcome.disposed, outcome.missing, outcome.refused, outcome.failed
        );
        outcome
    }

    async fn dispose_one(
        &self,
        candidate: &AttachmentPath,
        root: &Path,
        mode: ExecutionMode,
    ) -> DisposalAction {
        if !candidate.is_directly_in(root) {
            warn!(path = %candidate, root = %root.display(), "Refusing to dispose of a path not directly inside the attachment directory");
            return DisposalAction::Refused;
        }

        match self.directory.exists(candidate.as_path()).await {
            Ok(true) => {}
            Ok(false) => {
                warn!(path = %candidate, "Expected orphaned attachment is absent");
                return DisposalAction::Missing;
            }
            Err(e) => {
                warn!(path = %candidate, error = %e, "Cannot check orphaned attachment");
                return DisposalAction::Failed;
            }
        }

        match mode {
            ExecutionMode::Simulate => {
                debug!(path = %candidate, "Would delete orphaned attachment");
                DisposalAction::WouldDelete
            }
            ExecutionMode::Commit => match self.directory.remove(candidate.as_path()).await {
                Ok(()) => {
                    debug!(path = %candidate, "Deleted orphaned attachment");
                    DisposalAction::Deleted
                }
                Err(e) if e.is_not_found() => {
                    warn!(path = %candidate, "Orphaned attachment vanished before removal");
                    DisposalAction::Missing
                }
                Err(e) => {
                    warn!(path = %candidate, error = %e, "Failed to delete orphaned attachment");
                    DisposalAction::Failed
                }
            },
        }
    }
}
