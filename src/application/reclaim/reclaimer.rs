use chrono::Utc;
use std::sync::Arc;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use super::config::ReclaimConfig;
use super::disposal::{DisposalExecutor, DisposalOutcome};
use super::errors::ReclaimResult;
use super::reconciler::{Reconciliation, ReconciliationEngine};
use super::reference_extractor::ReferenceExtractor;
use super::results::ReconciliationReport;
use super::scanner::BlobDirectoryScanner;
use crate::application::ports::{AttachmentDirectory, ReferenceStore};
use crate::domain::value_objects::ExecutionMode;

/// Runs complete reclamation passes: scan → extract references → diff → dispose.
///
/// Each pass is self-contained and sequential. Nothing is carried over between
/// passes; the scanned set and orphan set live only for the duration of `run`.
///
/// # Examples
///
/// ```rust,ignore
/// let reclaimer = AttachmentReclaimer::new(directory, reference_store, ReclaimConfig::default());
///
/// let report = reclaimer.run(ExecutionMode::Simulate).await?;
/// println!("{} orphaned attachments", report.orphan_count());
/// ```
pub struct AttachmentReclaimer {
    scanner: BlobDirectoryScanner,
    engine: ReconciliationEngine,
    executor: DisposalExecutor,
}

impl AttachmentReclaimer {
    pub fn new(
        directory: Arc<dyn AttachmentDirectory>,
        reference_store: Arc<dyn ReferenceStore>,
        config: ReclaimConfig,
    ) -> Self {
        let extractor = ReferenceExtractor::new(reference_store);

        Self {
            scanner: BlobDirectoryScanner::new(Arc::clone(&directory)),
            engine: ReconciliationEngine::new(
                extractor,
                Arc::clone(&directory),
                config.path_matching,
            ),
            executor: DisposalExecutor::new(directory),
        }
    }

    /// Runs one full pass.
    ///
    /// # Errors
    ///
    /// Only a failure to read the reference store aborts the pass. Directory
    /// problems and disposal anomalies are logged and reflected in the report.
    pub async fn run(&self, mode: ExecutionMode) -> ReclaimResult<ReconciliationReport> {
        let run_id = Uuid::new_v4();
        let span = info_span!("reclaim_pass", %run_id, %mode);
        self.run_pass(run_id, mode).instrument(span).await
    }

    async fn run_pass(
        &self,
        run_id: Uuid,
        mode: ExecutionMode,
    ) -> ReclaimResult<ReconciliationReport> {
        let started_at = Utc::now();

        let scan = self.scanner.scan().await;
        let blobs_found = scan.paths.len();

        let (reconciliation, disposal) = match scan.root.as_deref() {
            Some(root) if !scan.is_empty() => {
                let reconciliation = self.engine.reconcile(&scan.paths, root).await?;
                let disposal = self
                    .executor
                    .dispose(&reconciliation.orphans, root, mode)
                    .await;
                (reconciliation, disposal)
            }
            _ => (Reconciliation::default(), DisposalOutcome::default()),
        };

        let report = ReconciliationReport {
            run_id,
            mode,
            blobs_found,
            blobs_referenced: reconciliation.referenced_count,
            blobs_disposed: disposal.disposed,
            references_scanned: reconciliation.references_scanned,
            entries_skipped: scan.entries_skipped,
            missing_at_disposal: disposal.missing,
            refused_outside_root: disposal.refused,
            disposal_failures: disposal.failed,
            started_at,
            finished_at: Utc::now(),
        };

        info!("{}", report.summary());
        if !report.is_clean() {
            warn!("Reclaim pass finished with anomalies\n{}", report.details());
        }
        Ok(report)
    }
}
