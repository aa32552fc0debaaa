use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::value_objects::ExecutionMode;

/// Request body for a reclamation pass
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ReclaimRequest {
    /// Delete orphaned attachments; `false` (default) only reports them
    #[serde(default)]
    pub commit: bool,
}

impl ReclaimRequest {
    pub fn dry_run() -> Self {
        Self { commit: false }
    }

    pub fn commit() -> Self {
        Self { commit: true }
    }

    pub fn mode(&self) -> ExecutionMode {
        ExecutionMode::from_commit_flag(self.commit)
    }
}
