use async_trait::async_trait;
use futures_util::TryStreamExt;
use sqlx::PgPool;
use tracing::debug;

use super::{IdentifierQuote, QueryBuilder};
use crate::application::ports::{ReferenceSink, ReferenceStore, RepositoryError};
use crate::domain::value_objects::{AttachmentReference, ReferenceColumn};

pub struct PostgresReferenceStore {
    pool: PgPool,
    source: ReferenceColumn,
    select_sql: String,
}

impl PostgresReferenceStore {
    pub fn new(pool: PgPool, source: ReferenceColumn) -> Self {
        let select_sql = QueryBuilder::select_reference_paths(&source, IdentifierQuote::DoubleQuote);
        Self {
            pool,
            source,
            select_sql,
        }
    }
}

#[async_trait]
impl ReferenceStore for PostgresReferenceStore {
    fn source(&self) -> &ReferenceColumn {
        &self.source
    }

    async fn visit_references(&self, sink: &mut dyn ReferenceSink) -> Result<u64, RepositoryError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION READ ONLY")
            .execute(&mut *tx)
            .await?;

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
