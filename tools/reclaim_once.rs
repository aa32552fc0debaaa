use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use attachment_reclaim::dto::ReclaimRequest;
use attachment_reclaim::value_objects::PathMatching;
use attachment_reclaim::{ApplicationBuilder, Config};

/// Run a single reclamation pass against the attachment directory and exit.
///
/// Without --commit this is a dry run: orphans are reported, nothing is deleted.
#[derive(Parser)]
#[command(name = "reclaim-once", version)]
struct Cli {
    /// Reference database (sqlite:..., postgres://...)
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Directory holding attachment blobs
    #[arg(long, env = "ATTACHMENT_DIR")]
    attachment_dir: Option<PathBuf>,

    /// Table holding attachment references
    #[arg(long, env = "REFERENCE_TABLE")]
    table: Option<String>,

    /// Column holding attachment paths
    #[arg(long, env = "REFERENCE_COLUMN")]
    column: Option<String>,

    /// How references are compared to files: exact or canonical
    #[arg(long, env = "PATH_MATCHING")]
    path_matching: Option<PathMatching>,

    /// Actually delete orphaned attachments
    #[arg(long)]
    commit: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn into_config(self) -> (Config, ReclaimRequest, bool) {
        let mut config = Config::from_env();
        if let Some(url) = self.database_url {
            config.database_url = url;
        }
        if let Some(dir) = self.attachment_dir {
            config.attachment_dir = dir;
        }
        if let Some(table) = self.table {
            config.reference_table = table;
        }
        if let Some(column) = self.column {
            config.reference_column = column;
        }
        if let Some(matching) = self.path_matching {
            config.path_matching = matching.to_string();
        }

        let request = if self.commit {
            ReclaimRequest::commit()
        } else {
            ReclaimRequest::dry_run()
        };
        (config, request, self.json)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so --json output stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let (config, request, json) = Cli::parse().into_config();
    config.validate().map_err(|e| anyhow!(e))?;

    let use_case = ApplicationBuilder::new(config)
        .with_database()
        .await
        .map_err(|e| anyhow!("failed to open reference database: {e}"))?
        .with_attachment_directory()
        .build_use_case()
        .map_err(|e| anyhow!(e.to_string()))?;

    let report = use_case
        .execute(&request)
        .await
        .context("reclamation pass aborted, nothing was deleted")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.summary());
        println!("{}", report.details());
    }

    Ok(())
}
