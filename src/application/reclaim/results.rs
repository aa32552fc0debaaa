/// Result types for reclamation passes
///
/// A pass reports three headline counts (found, referenced, disposed) plus
/// the diagnostic counters explaining any gap between orphans and disposals.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::value_objects::ExecutionMode;

/// Outcome of one scan → extract → diff → dispose pass
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReconciliationReport {
    /// Identifier correlating this report with its log lines
    pub run_id: Uuid,
    /// Whether orphans were deleted or only counted
    pub mode: ExecutionMode,
    /// Distinct canonical attachment files found in the directory
    pub blobs_found: usize,
    /// Scanned files matched by at least one stored reference
    pub blobs_referenced: usize,
    /// Orphans deleted (commit) or that would have been deleted (simulate)
    pub blobs_disposed: usize,
    /// Reference rows read from the store
    pub references_scanned: u64,
    /// Directory entries skipped because they could not be resolved
    pub entries_skipped: usize,
    /// Orphans already gone when disposal reached them
    pub missing_at_disposal: usize,
    /// Orphans refused because they were not directly inside the attachment directory
    pub refused_outside_root: usize,
    /// Orphans whose removal failed
    pub disposal_failures: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl ReconciliationReport {
    /// Number of scanned blobs with no matching reference.
    ///
    /// `blobs_referenced + orphan_count() == blobs_found` always holds.
    pub fn orphan_count(&self) -> usize {
        self.blobs_found - self.blobs_referenced
    }

    /// Returns true if no anomaly was observed during the pass
    pub fn is_clean(&self) -> bool {
        self.entries_skipped == 0
            && self.missing_at_disposal == 0
            && self.refused_outside_root == 0
            && self.disposal_failures == 0
    }

    /// Returns a one-line summary of the pass
    pub fn summary(&self) -> String {
        let verb = match self.mode {
            ExecutionMode::Commit => "deleted",
            ExecutionMode::Simulate => "would delete",
        };
        format!(
            "Reclaim pass {} ({}): {} found, {} referenced, {} orphaned, {} {}",
            self.run_id,
            self.mode,
            self.blobs_found,
            self.blobs_referenced,
            self.orphan_count(),
            verb,
            self.blobs_disposed
        )
    }

    /// Returns detailed information about the pass
    pub fn details(&self) -> String {
        let elapsed = self.finished_at - self.started_at;
        [
            format!("Run: {}", self.run_id),
            format!("Mode: {}", self.mode),
            format!("Blobs found: {}", self.blobs_found),
            format!("Blobs referenced: {}", self.blobs_referenced),
            format!("Blobs disposed: {}", self.blobs_disposed),
            format!("References scanned: {}", self.references_scanned),
            format!("Entries skipped: {}", self.entries_skipped),
            format!("Missing at disposal: {}", self.missing_at_disposal),
            format!("Refused outside root: {}", self.refused_outside_root),
            format!("Disposal failures: {}", self.disposal_failures),
            format!("Elapsed: {} ms", elapsed.num_milliseconds()),
        ]
        .join("\n")
    }
}

/// Cumulative statistics across passes
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ReclaimStatistics {
    pub passes_completed: usize,
    pub passes_failed: usize,
    pub total_blobs_found: usize,
    pub total_blobs_referenced: usize,
    pub total_blobs_disposed: usize,
    pub total_anomalies: usize,
    pub last_run_id: Option<Uuid>,
    pub last_finished_at: Option<DateTime<Utc>>,
}

impl ReclaimStatistics {
    /// Updates statistics with a completed pass
    pub fn update(&mut self, report: &ReconciliationReport) {
        self.passes_completed += 1;
        self.total_blobs_found += report.blobs_found;
        self.total_blobs_referenced += report.blobs_referenced;
        self.total_blobs_disposed += report.blobs_disposed;
        self.total_anomalies += report.entries_skipped
            + report.missing_at_disposal
            + report.refused_outside_root
            + report.disposal_failures;
        self.last_run_id = Some(report.run_id);
        self.last_finished_at = Some(report.finished_at);
    }

    /// Records a pass that aborted before producing a report
    pub fn record_failure(&mut self) {
        self.passes_failed += 1;
    }

    /// One-line digest of the cumulative counters
    pub fn summary(&self) -> String {
        format!(
            "{} passes completed, {} failed: {} found, {} referenced, {} disposed, {} anomalies",
            self.passes_completed,
            self.passes_failed,
            self.total_blobs_found,
            self.total_blobs_referenced,
            self.total_blobs_disposed,
            self.total_anomalies
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(found: usize, referenced: usize, disposed: usize) -> ReconciliationReport {
        let now = Utc::now();
        ReconciliationReport {
            run_id: Uuid::new_v4(),
            mode: ExecutionMode::Commit,
            blobs_found: found,
            blobs_referenced: referenced,
            blobs_disposed: disposed,
            references_scanned: referenced as u64,
            entries_skipped: 0,
            missing_at_disposal: 0,
            refused_outside_root: 0,
            disposal_failures: 0,
            started_at: now,
            finished_at: now,
        }
    }

    #[test]
    fn test_orphan_count_closes_accounting() {
        let report = report(10, 7, 3);
        assert_eq!(report.orphan_count(), 3);
        assert!(report.is_clean());
    }

    #[test]
    fn test_summary_mentions_counts() {
        let mut report = report(3, 1, 2);
        let summary = report.summary();
        assert!(summary.contains("3 found"));
        assert!(summary.contains("1 referenced"));
        assert!(summary.contains("deleted 2"));

        report.mode = ExecutionMode::Simulate;
        assert!(report.summary().contains("would delete 2"));
    }

    #[test]
    fn test_statistics_update() {
        let mut stats = ReclaimStatistics::default();
        let mut first = report(5, 3, 2);
        first.missing_at_disposal = 1;

        stats.update(&first);
        stats.update(&report(3, 3, 0));
        stats.record_failure();

        assert_eq!(stats.passes_completed, 2);
        assert_eq!(stats.passes_failed, 1);
        assert_eq!(stats.total_blobs_found, 8);
        assert_eq!(stats.total_blobs_referenced, 6);
        assert_eq!(stats.total_blobs_disposed, 2);
        assert_eq!(stats.total_anomalies, 1);
        assert!(stats.last_run_id.is_some());
        assert_eq!(
            stats.summary(),
            "2 passes completed, 1 failed: 8 found, 6 referenced, 2 disposed, 1 anomalies"
        );
    }
}
