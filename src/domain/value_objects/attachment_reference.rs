use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain::errors::DomainError;

/// Path string recorded in a reference row.
///
/// The store does not canonicalize what it records, so this is kept verbatim.
/// Only the empty string is rejected, mirroring the `<> ''` filter of the
/// reference query; whitespace is a legal file name and is kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttachmentReference(String);

impl AttachmentReference {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::InvalidReference(
                "Reference path cannot be empty".to_string(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl std::fmt::Display for AttachmentReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
