pub mod config;
pub mod disposal;
pub mod errors;
pub mod reclaimer;
pub mod reconciler;
pub mod reference_extractor;
pub mod results;
pub mod scanner;
#[cfg(test)]
pub mod test_utils;

pub use config::ReclaimConfig;
pub use disposal::{DisposalExecutor, DisposalOutcome};
pub use errors::{ReclaimError, ReclaimResult};
pub use reclaimer::AttachmentReclaimer;
pub use reconciler::{diff_references, OrphanSet, Reconciliation, ReconciliationEngine};
pub use reference_extractor::ReferenceExtractor;
pub use results::{ReclaimStatistics, ReconciliationReport};
pub use scanner::{BlobDirectoryScanner, ScanOutcome};
