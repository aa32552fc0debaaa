use async_trait::async_trait;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use super::errors::ReclaimResult;
use super::reference_extractor::ReferenceExtractor;
use crate::application::ports::{AttachmentDirectory, ReferenceSink};
use crate::domain::value_objects::{AttachmentPath, AttachmentReference, PathMatching};

/// Scanned attachments with no matching reference.
pub type OrphanSet = HashSet<AttachmentPath>;

/// Result of diffing a scan against the reference store
#[derive(Debug, Default, Clone)]
pub struct Reconciliation {
    pub orphans: OrphanSet,
    /// Scanned attachments matched by a reference
    pub referenced_count: usize,
    /// Rows read from the store (zero when the query was skipped)
    pub references_scanned: u64,
}

/// Pure set difference: scanned paths minus the given references.
///
/// References are compared as paths (component-wise); no filesystem access.
/// A reference absent from `scanned` is ignored. Returns the orphans and the
/// number of scanned paths that were matched.
pub fn diff_references<I, P>(scanned: &HashSet<AttachmentPath>, references: I) -> (OrphanSet, usize)
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut remaining = scanned.clone();
    let mut matched = 0;
    for reference in references {
        if remaining.remove(reference.as_ref()) {
            matched += 1;
        }
    }
    (remaining, matched)
}

/// Strikes matched paths off the candidate set as references stream in.
struct OrphanSieve<'a> {
    remaining: HashSet<AttachmentPath>,
    matched: usize,
    directory: &'a dyn AttachmentDirectory,
    root: &'a Path,
    matching: PathMatching,
}

impl OrphanSieve<'_> {
    async fn resolve(&self, reference: &AttachmentReference) -> Option<PathBuf> {
        let path = reference.as_path();
        let path = if path.is_relative() {
            self.root.join(path)
        } else {
            path.to_path_buf()
        };

        match self.directory.canonicalize(&path).await {
            Ok(canonical) => Some(canonical),
            Err(e) => {
                debug!(reference = %reference, error = %e, "Reference does not resolve to an existing file");
                None
            }
        }
    }
}

#[async_trait]
impl ReferenceSink for OrphanSieve<'_> {
    async fn accept(&mut self, reference: AttachmentReference) {
        if self.remaining.remove(reference.as_path()) {
            self.matched += 1;
            return;
        }

        if self.matching == PathMatching::Canonical {
            if let Some(canonical) = self.resolve(&reference).await {
                if self.remaining.remove(canonical.as_path()) {
                    self.matched += 1;
                }
            }
        }
    }
}

/// Computes which scanned attachments are not referenced by the store.
pub struct ReconciliationEngine {
    extractor: ReferenceExtractor,
    directory: Arc<dyn AttachmentDirectory>,
    matching: PathMatching,
}

impl ReconciliationEngine {
    pub fn new(
        extractor: ReferenceExtractor,
        directory: Arc<dyn AttachmentDirectory>,
        matching: PathMatching,
    ) -> Self {
        Self {
            extractor,
            directory,
            matching,
        }
    }

    /// Diff `scanned` against every stored reference.
    ///
    /// `scanned` is left untouched; the orphans are returned as a new set.
    /// An empty scan returns immediately without querying the store.
    /// `root` is the canonical attachment directory, used to resolve relative
    /// references under [`PathMatching::Canonical`].
    pub async fn reconcile(
        &self,
        scanned: &HashSet<AttachmentPath>,
        root: &Path,
    ) -> ReclaimResult<Reconciliation> {
        if scanned.is_empty() {
            debug!("No attachments scanned; skipping reference query");
            return Ok(Reconciliation::default());
        }

        let mut sieve = OrphanSieve {
            remaining: scanned.clone(),
            matched: 0,
            directory: self.directory.as_ref(),
            root,
            matching: self.matching,
        };

        let references_scanned = self.extractor.drain_into(&mut sieve).await?;

        debug!(
            "Matched {} of {} attachments against {} references",
            sieve.matched,
            scanned.len(),
            references_scanned
        );

        Ok(Reconciliation {
            orphans: sieve.remaining,
            referenced_count: sieve.matched,
            references_scanned,
        })
    }
}
