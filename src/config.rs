use std::path::PathBuf;

use crate::domain::errors::DomainError;
use crate::domain::value_objects::{PathMatching, ReferenceColumn};

/// Relational backend holding the reference table, chosen by URL scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackend {
    Sqlite,
    Postgres,
}

impl DatabaseBackend {
    pub fn from_url(url: &str) -> Option<Self> {
        if url.starts_with("sqlite:") {
            Some(DatabaseBackend::Sqlite)
        } else if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Some(DatabaseBackend::Postgres)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub attachment_dir: PathBuf,
    pub reference_table: String,
    pub reference_column: String,
    /// Raw `PATH_MATCHING` value; parsed by [`Config::path_matching_policy`]
    pub path_matching: String,
    pub listen_addr: String,
    pub admin_api_keys: Vec<String>,
    pub disable_auth: bool,
    // Database connection pool settings
    pub db_max_connections: u32,
    pub db_acquire_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://mmssms.db".to_string()),
            attachment_dir: std::env::var("ATTACHMENT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/data/app_parts")),
            reference_table: std::env::var("REFERENCE_TABLE")
                .unwrap_or_else(|_| ReferenceColumn::DEFAULT_TABLE.to_string()),
            reference_column: std::env::var("REFERENCE_COLUMN")
                .unwrap_or_else(|_| ReferenceColumn::DEFAULT_COLUMN.to_string()),
            path_matching: std::env::var("PATH_MATCHING")
                .unwrap_or_else(|_| PathMatching::default().to_string()),
            listen_addr: std::env::var("LISTEN_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            admin_api_keys: std::env::var("ADMIN_API_KEYS")
                .map(|keys| parse_key_list(&keys))
                .unwrap_or_default(),
            disable_auth: std::env::var("DISABLE_AUTH").unwrap_or_default() == "true",
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
            db_acquire_timeout_secs: std::env::var("DB_ACQUIRE_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        }
    }

    /// Table and column holding reference paths
    pub fn reference_source(&self) -> Result<ReferenceColumn, String> {
        ReferenceColumn::new(&self.reference_table, &self.reference_column)
            .map_err(|e| e.to_string())
    }

    /// How references are compared to scanned files
    pub fn path_matching_policy(&self) -> Result<PathMatching, String> {
        self.path_matching.parse().map_err(|e: DomainError| e.to_string())
    }

    pub fn backend(&self) -> Result<DatabaseBackend, String> {
        DatabaseBackend::from_url(&self.database_url).ok_or_else(|| {
            "DATABASE_URL must start with sqlite:, postgres:// or postgresql://".to_string()
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        self.backend()?;
        self.reference_source()?;
        self.path_matching_policy()?;

        if !self.attachment_dir.is_absolute() {
            return Err("ATTACHMENT_DIR must be an absolute path".to_string());
        }

        if self.listen_addr.is_empty() {
            return Err("LISTEN_ADDR cannot be empty".to_string());
        }

        if self.db_max_connections == 0 {
            return Err("DB_MAX_CONNECTIONS must be at least 1".to_string());
        }

        Ok(())
    }
}

fn parse_key_list(keys: &str) -> Vec<String> {
    keys.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            database_url: "sqlite://mmssms.db".to_string(),
            attachment_dir: PathBuf::from("/data/app_parts"),
            reference_table: "part".to_string(),
            reference_column: "_data".to_string(),
            path_matching: "canonical".to_string(),
            listen_addr: "127.0.0.1:8080".to_string(),
            admin_api_keys: vec!["secret".to_string()],
            disable_auth: false,
            db_max_connections: 5,
            db_acquire_timeout_secs: 30,
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(config().validate().is_ok());
        assert_eq!(config().backend().unwrap(), DatabaseBackend::Sqlite);
    }

    #[test]
    fn test_backend_from_url() {
        assert_eq!(
            DatabaseBackend::from_url("postgresql://localhost/mms"),
            Some(DatabaseBackend::Postgres)
        );
        assert_eq!(DatabaseBackend::from_url("mysql://localhost/mms"), None);
    }

    #[test]
    fn test_rejects_bad_settings() {
        let mut bad_url = config();
        bad_url.database_url = "mysql://localhost/mms".to_string();
        assert!(bad_url.validate().is_err());

        let mut relative_dir = config();
        relative_dir.attachment_dir = PathBuf::from("app_parts");
        assert!(relative_dir.validate().is_err());

        let mut bad_column = config();
        bad_column.reference_column = "_data; --".to_string();
        assert!(bad_column.validate().is_err());

        let mut no_connections = config();
        no_connections.db_max_connections = 0;
        assert!(no_connections.validate().is_err());
    }

    #[test]
    fn test_unknown_path_matching_is_rejected() {
        let mut typo = config();
        typo.path_matching = "exatc".to_string();
        let err = typo.validate().unwrap_err();
        assert!(err.contains("exatc"));

        let mut exact = config();
        exact.path_matching = "EXACT".to_string();
        assert!(exact.validate().is_ok());
        assert_eq!(exact.path_matching_policy().unwrap(), PathMatching::Exact);
    }

    #[test]
    fn test_parse_key_list() {
        assert_eq!(parse_key_list(" a, b ,,c"), vec!["a", "b", "c"]);
        assert!(parse_key_list("").is_empty());
    }
}
