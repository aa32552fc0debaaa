use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

use crate::api::middleware::auth::AuthConfig;
use crate::api::router::AppState;
use crate::application::{
    ports::{AttachmentDirectory, ReferenceStore},
    reclaim::{AttachmentReclaimer, ReclaimConfig},
    use_cases::ReclaimAttachmentsUseCase,
};
use crate::config::{Config, DatabaseBackend};
use crate::infrastructure::{
    persistence::{PostgresReferenceStore, SqliteReferenceStore},
    storage::LocalAttachmentDirectory,
};

/// Application builder for clean dependency injection and setup
pub struct ApplicationBuilder {
    config: Config,
    reference_store: Option<Arc<dyn ReferenceStore>>,
    directory: Option<Arc<dyn AttachmentDirectory>>,
}

impl ApplicationBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            reference_store: None,
            directory: None,
        }
    }

    /// Connect to the reference database with retry logic.
    ///
    /// SQLite databases are opened read-only; the reclaimer never writes to them.
    pub async fn with_database(mut self) -> Result<Self, Box<dyn std::error::Error>> {
        let source = self.config.reference_source()?;
        let backend = self.config.backend()?;
        let acquire_timeout = Duration::from_secs(self.config.db_acquire_timeout_secs);
        let max_connections = self.config.db_max_connections;
        let url = self.config.database_url.clone();

        info!("Connecting to {:?} reference database", backend);

        let store: Arc<dyn ReferenceStore> = match backend {
            DatabaseBackend::Sqlite => {
                let options = SqliteConnectOptions::from_str(&url)?.read_only(true);
                let pool = connect_with_retry(|| {
                    SqlitePoolOptions::new()
                        .max_connections(max_connections)
                        .acquire_timeout(acquire_timeout)
                        .connect_with(options.clone())
                })
                .await?;
                Arc::new(SqliteReferenceStore::new(pool, source))
            }
            DatabaseBackend::Postgres => {
                let pool = connect_with_retry(|| {
                    PgPoolOptions::new()
                        .max_connections(max_connections)
                        .acquire_timeout(acquire_timeout)
                        .connect(&url)
                })
                .await?;
                Arc::new(PostgresReferenceStore::new(pool, source))
            }
        };

        info!(
            "Database pool configured: max={}, acquire_timeout={}s, source={}",
            max_connections,
            self.config.db_acquire_timeout_secs,
            store.source()
        );

        self.reference_store = Some(store);
        Ok(self)
    }

    /// Set up the attachment directory adapter
    pub fn with_attachment_directory(mut self) -> Self {
        info!(
            "Attachment directory: {}",
            self.config.attachment_dir.display()
        );
        self.directory = Some(Arc::new(LocalAttachmentDirectory::new(
            self.config.attachment_dir.clone(),
        )));
        self
    }

    /// Build the reclaim use case
    pub fn build_use_case(&self) -> Result<Arc<ReclaimAttachmentsUseCase>, Box<dyn std::error::Error>> {
        let reference_store = self
            .reference_store
            .clone()
            .ok_or("Reference store not initialized")?;
        let directory = self
            .directory
            .clone()
            .ok_or("Attachment directory not initialized")?;

        let reclaimer = AttachmentReclaimer::new(
            directory,
            reference_store,
            ReclaimConfig::new(self.config.path_matching_policy()?),
        );

        Ok(Arc::new(ReclaimAttachmentsUseCase::new(reclaimer)))
    }

    /// Build application state for the HTTP surface
    pub fn build(self) -> Result<AppState, Box<dyn std::error::Error>> {
        let reclaim_use_case = self.build_use_case()?;
        let reference_store = self
            .reference_store
            .ok_or("Reference store not initialized")?;
        let directory = self
            .directory
            .ok_or("Attachment directory not initialized")?;

        Ok(AppState {
            reference_store,
            directory,
            reclaim_use_case,
            auth: Arc::new(AuthConfig::new(
                self.config.admin_api_keys.clone(),
                self.config.disable_auth,
            )),
        })
    }
}

/// Retry a pool connection with exponential backoff
async fn connect_with_retry<T, F, Fut>(mut connect: F) -> Result<T, sqlx::Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    let mut retries = 3;
    let mut delay = Duration::from_secs(1);
    loop {
        match connect().await {
            Ok(pool) => return Ok(pool),
            Err(e) if retries > 0 => {
                retries -= 1;
                tracing::warn!(
                    "Database connection failed, retrying in {:?} ({} retries left): {}",
                    delay,
                    retries,
                    e
                );
                tokio::time::sleep(delay).await;
                delay *= 2; // Exponential backoff
            }
            Err(e) => {
                tracing::error!("Failed to connect to database after retries: {}", e);
                return Err(e);
            }
        }
    }
}
