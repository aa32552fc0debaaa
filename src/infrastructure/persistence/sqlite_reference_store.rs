use async_trait::async_trait;
use futures_util::TryStreamExt;
use sqlx::SqlitePool;
use tracing::debug;

use super::{IdentifierQuote, QueryBuilder};
use crate::application::ports::{ReferenceSink, ReferenceStore, RepositoryError};
use crate::domain::value_objects::{AttachmentReference, ReferenceColumn};

/// Reference store backed by an SQLite database (the telephony store layout)
pub struct SqliteReferenceStore {
    pool: SqlitePool,
    source: ReferenceColumn,
    select_sql: String,
}

impl SqliteReferenceStore {
    pub fn new(pool: SqlitePool, source: ReferenceColumn) -> Self {
        let select_sql = QueryBuilder::select_reference_paths(&source, IdentifierQuote::Bracket);
        Self {
            pool,
            source,
            select_sql,
        }
    }
}

#[async_trait]
impl ReferenceStore for SqliteReferenceStore {
    fn source(&self) -> &ReferenceColumn {
        &self.source
    }

    async fn visit_references(&self, sink: &mut dyn ReferenceSink) -> Result<u64, RepositoryError> {
        // Dropping `tx` on an early return rolls back and hands the
        // connection back to the pool.
        let mut tx = self.pool.begin().await?;
        let mut delivered = 0;

        {
            let mut rows = sqlx::query_scalar::<_, String>(&self.select_sql).fetch(&mut *tx);
            while let Some(path) = rows.try_next().await? {
                match AttachmentReference::new(path) {
                    Ok(reference) => {
                        sink.accept(reference).await;
                        delivered += 1;
                    }
                    Err(e) => debug!("Skipping reference row: {}", e),
                }
            }
        }

        tx.rollback().await?;
        Ok(delivered)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query(QueryBuilder::PING).execute(&self.pool).await?;
        Ok(())
    }
}
