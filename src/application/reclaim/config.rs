use crate::domain::value_objects::PathMatching;

/// Configuration for reclamation passes
#[derive(Debug, Clone, Default)]
pub struct ReclaimConfig {
    /// How stored references are compared against scanned paths
    pub path_matching: PathMatching,
}

impl ReclaimConfig {
    pub fn new(path_matching: PathMatching) -> Self {
        Self { path_matching }
    }
}
