//! Shared fixtures: a SQLite parts table next to a temporary attachment directory
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tempfile::TempDir;

use attachment_reclaim::value_objects::PathMatching;
use attachment_reclaim::Config;

/// Test environment: a parts database and an attachment directory
pub struct TestEnvironment {
    pub pool: SqlitePool,
    pub database_url: String,
    pub attachment_dir: PathBuf,
    _temp_dir: TempDir,
}

impl TestEnvironment {
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let attachment_dir = temp_dir.path().join("app_parts");
        std::fs::create_dir_all(&attachment_dir).expect("Failed to create attachment dir");
        let attachment_dir = attachment_dir
            .canonicalize()
            .expect("Failed to canonicalize attachment dir");

        let db_path = temp_dir.path().join("mmssms.db");
        let database_url = format!("sqlite://{}", db_path.display());

        let options = SqliteConnectOptions::from_str(&database_url)
            .expect("Invalid SQLite URL")
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .expect("Failed to open test database");

        sqlx::query("CREATE TABLE part (_id INTEGER PRIMARY KEY, mid INTEGER, ct TEXT, _data TEXT)")
            .execute(&pool)
            .await
            .expect("Failed to create part table");

        Self {
            pool,
            database_url,
            attachment_dir,
            _temp_dir: temp_dir,
        }
    }

    pub fn config(&self) -> Config {
        Config {
            database_url: self.database_url.clone(),
            attachment_dir: self.attachment_dir.clone(),
            reference_table: "part".to_string(),
            reference_column: "_data".to_string(),
            path_matching: PathMatching::Canonical.to_string(),
            listen_addr: "127.0.0.1:0".to_string(),
            admin_api_keys: vec![TEST_API_KEY.to_string()],
            disable_auth: false,
            db_max_connections: 2,
            db_acquire_timeout_secs: 5,
        }
    }

    /// Write attachment files with distinct contents
    pub fn create_blobs(&self, names: &[&str]) {
        for name in names {
            std::fs::write(self.attachment_dir.join(name), format!("payload of {name}"))
                .expect("Failed to write blob");
        }
    }

    pub fn blob_path(&self, name: &str) -> PathBuf {
        self.attachment_dir.join(name)
    }

    /// Insert one part row per reference (stored as an absolute path)
    pub async fn reference(&self, names: &[&str]) {
        for name in names {
            self.insert_raw(Some(&self.blob_path(name).to_string_lossy()))
                .await;
        }
    }

    pub async fn insert_raw(&self, data: Option<&str>) {
        sqlx::query("INSERT INTO part (mid, ct, _data) VALUES (1, 'image/jpeg', ?)")
            .bind(data)
            .execute(&self.pool)
            .await
            .expect("Failed to insert part row");
    }

    pub fn remaining_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(&self.attachment_dir)
            .expect("Failed to read attachment dir")
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// File name to contents, for byte-for-byte comparisons
    pub fn snapshot(&self) -> BTreeMap<String, Vec<u8>> {
        snapshot_dir(&self.attachment_dir)
    }
}

pub const TEST_API_KEY: &str = "test-admin-key";

pub fn snapshot_dir(dir: &Path) -> BTreeMap<String, Vec<u8>> {
    std::fs::read_dir(dir)
        .expect("Failed to read dir")
        .map(|e| {
            let e = e.unwrap();
            (
                e.file_name().to_string_lossy().into_owned(),
                std::fs::read(e.path()).unwrap(),
            )
        })
        .collect()
}
