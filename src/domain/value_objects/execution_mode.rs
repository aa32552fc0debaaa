use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// What the disposal step does with an orphan that is still on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Dry run: count would-be deletions, never touch the filesystem
    #[default]
    Simulate,
    /// Remove orphaned files
    Commit,
}

impl ExecutionMode {
    pub fn from_commit_flag(commit: bool) -> Self {
        if commit {
            ExecutionMode::Commit
        } else {
            ExecutionMode::Simulate
        }
    }
}

impl std::fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionMode::Simulate => write!(f, "simulate"),
            ExecutionMode::Commit => write!(f, "commit"),
        }
    }
}
