pub mod health;
pub mod reclaim;

pub use health::{health_handler, readiness_handler};
pub use reclaim::{reclaim_handler, reclaim_stats_handler};
