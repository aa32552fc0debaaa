use std::sync::Arc;
use tracing::{debug, error};

use super::errors::{ReclaimError, ReclaimResult};
use crate::application::ports::{ReferenceSink, ReferenceStore};

/// Pulls recorded attachment paths out of the reference store.
///
/// References are handed to the sink as the cursor advances; the extractor
/// never materializes the whole result set.
pub struct ReferenceExtractor {
    store: Arc<dyn ReferenceStore>,
}

impl ReferenceExtractor {
    pub fn new(store: Arc<dyn ReferenceStore>) -> Self {
        Self { store }
    }

    /// Drain every non-empty reference into `sink`, returning how many rows
    /// were delivered.
    ///
    /// # Errors
    ///
    /// Any store failure aborts the pass with [`ReclaimError::ReferenceQuery`].
    /// Reporting zero references instead would classify every blob as orphaned.
    pub async fn drain_into(&self, sink: &mut dyn ReferenceSink) -> ReclaimResult<u64> {
        let source = self.store.source().to_string();
        debug!(source = %source, "Reading attachment references");

        let delivered = self.store.visit_references(sink).await.map_err(|e| {
            error!(source = %source, error = %e, "Reference query failed; aborting reclaim pass");
            ReclaimError::reference_query(source.clone(), e)
        })?;

        debug!(source = %source, "Read {} attachment references", delivered);
        Ok(delivered)
    }
}
