use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::application::ports::AttachmentDirectory;
use crate::domain::value_objects::AttachmentPath;

/// Result of enumerating the attachment directory.
#[derive(Debug, Default, Clone)]
pub struct ScanOutcome {
    /// Canonical attachment root, `None` when it could not be resolved
    pub root: Option<PathBuf>,
    /// Distinct canonical paths of every file found
    pub paths: HashSet<AttachmentPath>,
    /// Entries dropped because they could not be resolved or escaped the root
    pub entries_skipped: usize,
}

impl ScanOutcome {
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Enumerates attachment blobs present on disk.
///
/// A directory that cannot be listed yields an empty scan rather than an
/// error.
pub struct BlobDirectoryScanner {
    directory: Arc<dyn AttachmentDirectory>,
}

impl BlobDirectoryScanner {
    pub fn new(directory: Arc<dyn AttachmentDirectory>) -> Self {
        Self { directory }
    }

    pub async fn scan(&self) -> ScanOutcome {
        let root = match self.directory.canonical_root().await {
            Ok(root) => root,
            Err(e) => {
                warn!(error = %e, "Cannot resolve attachment directory; treating scan as empty");
                return ScanOutcome::default();
            }
        };

        let entries = match self.directory.list_files().await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(root = %root.display(), error = %e, "Cannot list attachment directory; treating scan as empty");
                return ScanOutcome {
                    root: Some(root),
                    ..ScanOutcome::default()
                };
            }
        };

        let mut paths = HashSet::with_capacity(entries.len());
        let mut entries_skipped = 0;

        for entry in entries {
            let canonical = match self.directory.canonicalize(&entry).await {
                Ok(canonical) => canonical,
                Err(e) => {
                    warn!(path = %entry.display(), error = %e, "Skipping unresolvable attachment entry");
                    entries_skipped += 1;
                    continue;
                }
            };

            match AttachmentPath::from_canonical(canonical) {
                Ok(path) if path.is_directly_in(&root) => {
                    if !paths.insert(path) {
                        debug!(path = %entry.display(), "Entry resolves to an already scanned attachment");
                    }
                }
                Ok(path) => {
                    warn!(path = %entry.display(), target = %path, "Skipping entry that does not resolve directly inside the attachment directory");
                    entries_skipped += 1;
                }
                Err(e) => {
                    warn!(path = %entry.display(), error = %e, "Skipping attachment entry");
                    entries_skipped += 1;
                }
            }
        }

        debug!("Scanned {} attachments in {}", paths.len(), root.display());

        ScanOutcome {
            root: Some(root),
            paths,
            entries_skipped,
        }
    }
}
