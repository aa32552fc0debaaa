//! # Attachment Reclaim - Orphaned MMS Attachment Reclamation
//!
//! Finds attachment files in the MMS parts directory that no row of the
//! message-part table references any more, and deletes them (or, in a
//! dry run, reports what would be deleted).
//!
//! ## Architecture Layers
//!
//! - **Domain**: Value objects (attachment paths, references, execution mode)
//! - **Application**: Ports and the reclamation pipeline (scan, extract, reconcile, dispose)
//! - **Infrastructure**: Adapters for the attachment directory and the reference database
//! - **API**: HTTP handlers and middleware
//!
//! ## Safety Properties
//!
//! - A referenced file is never deleted
//! - A failed reference query deletes nothing
//! - Nothing outside the attachment directory is ever touched
//! - Dry runs leave the filesystem unchanged
//!
//! ## Example Usage
//!
//! ```no_run
//! use attachment_reclaim::{ApplicationBuilder, Config};
//! use attachment_reclaim::dto::ReclaimRequest;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let builder = ApplicationBuilder::new(Config::from_env())
//!     .with_database()
//!     .await?
//!     .with_attachment_directory();
//! let use_case = builder.build_use_case()?;
//!
//! let report = use_case.execute(&ReclaimRequest::dry_run()).await?;
//! println!("{}", report.summary());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export key types explicitly to avoid ambiguity
pub use api::errors as api_errors;
pub use application::builder::ApplicationBuilder;
pub use application::reclaim::{ReclaimError, ReclaimStatistics, ReconciliationReport};
pub use application::{dto, ports, use_cases};
pub use config::Config;
pub use domain::errors as domain_errors;
pub use domain::value_objects;
