use async_trait::async_trait;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::application::ports::{ReferenceSink, ReferenceStore, RepositoryError};
use crate::domain::value_objects::{AttachmentPath, AttachmentReference, ReferenceColumn};

/// In-memory reference store for testing
pub struct InMemoryReferenceStore {
    source: ReferenceColumn,
    pub references: Mutex<Vec<Option<String>>>,
    pub queries: AtomicUsize,
    pub should_fail: bool,
}

impl InMemoryReferenceStore {
    pub fn new<S: Into<String>>(references: Vec<S>) -> Self {
        Self {
            source: ReferenceColumn::default(),
            references: Mutex::new(references.into_iter().map(|r| Some(r.into())).collect()),
            queries: AtomicUsize::new(0),
            should_fail: false,
        }
    }

    /// Store whose rows include NULL and empty values, like a real parts table
    pub fn with_rows(rows: Vec<Option<&str>>) -> Self {
        Self {
            source: ReferenceColumn::default(),
            references: Mutex::new(rows.into_iter().map(|r| r.map(str::to_string)).collect()),
            queries: AtomicUsize::new(0),
            should_fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::new(Vec::<String>::new())
        }
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReferenceStore for InMemoryReferenceStore {
    fn source(&self) -> &ReferenceColumn {
        &self.source
    }

    async fn visit_references(&self, sink: &mut dyn ReferenceSink) -> Result<u64, RepositoryError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            return Err(RepositoryError::Internal("database is locked".to_string()));
        }

        let rows = self.references.lock().unwrap().clone();
        let mut delivered = 0;
        for row in rows.into_iter().flatten() {
            if let Ok(reference) = AttachmentReference::new(row) {
                sink.accept(reference).await;
                delivered += 1;
            }
        }
        Ok(delivered)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        if self.should_fail {
            return Err(RepositoryError::Internal("database is locked".to_string()));
        }
        Ok(())
    }
}

/// Helper function to build a scanned set from absolute path strings
pub fn scanned_set(paths: &[&str]) -> HashSet<AttachmentPath> {
    paths
        .iter()
        .map(|p| AttachmentPath::from_canonical(PathBuf::from(p)).unwrap())
        .collect()
}

/// Helper function to create attachment files in a directory
pub fn create_blobs(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
    names
        .iter()
        .map(|name| {
            let path = dir.join(name);
            std::fs::write(&path, format!("payload of {}", name)).unwrap();
            path.canonicalize().unwrap()
        })
        .collect()
}
