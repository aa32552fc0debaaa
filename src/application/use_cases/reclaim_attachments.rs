use parking_lot::Mutex;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{error, info};

use crate::application::dto::ReclaimRequest;
use crate::application::reclaim::{
    AttachmentReclaimer, ReclaimError, ReclaimStatistics, ReconciliationReport,
};

/// Use case: reconcile the attachment directory with the reference table
/// and dispose of unreferenced files.
///
/// Passes are serialized; a caller arriving while a pass runs waits for it
/// to finish and then runs its own.
pub struct ReclaimAttachmentsUseCase {
    reclaimer: AttachmentReclaimer,
    pass_gate: AsyncMutex<()>,
    statistics: Mutex<ReclaimStatistics>,
}

impl ReclaimAttachmentsUseCase {
    pub fn new(reclaimer: AttachmentReclaimer) -> Self {
        Self {
            reclaimer,
            pass_gate: AsyncMutex::new(()),
            statistics: Mutex::new(ReclaimStatistics::default()),
        }
    }

    /// Execute one reclamation pass
    pub async fn execute(
        &self,
        request: &ReclaimRequest,
    ) -> Result<ReconciliationReport, ReclaimError> {
        let _pass = self.pass_gate.lock().await;

        match self.reclaimer.run(request.mode()).await {
            Ok(report) => {
                let summary = {
                    let mut stats = self.statistics.lock();
                    stats.update(&report);
                    stats.summary()
                };
                info!(run_id = %report.run_id, "Reclaim statistics: {}", summary);
                Ok(report)
            }
            Err(e) => {
                error!("Reclaim pass failed: {}", e);
                let summary = {
                    let mut stats = self.statistics.lock();
                    stats.record_failure();
                    stats.summary()
                };
                info!("Reclaim statistics: {}", summary);
                Err(e)
            }
        }
    }

    /// Snapshot of the statistics accumulated since startup
    pub fn statistics(&self) -> ReclaimStatistics {
        self.statistics.lock().clone()
    }
}
