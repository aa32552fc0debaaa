use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::path::{Path, PathBuf};

use crate::domain::errors::DomainError;

/// Canonical (absolute, symlink-resolved) location of one attachment blob.
///
/// Equality and hashing operate on the canonical form, so two textually
/// different paths that resolve to the same file collapse into one value.
/// Construct it only from the output of a canonicalization call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttachmentPath(PathBuf);

impl AttachmentPath {
    pub fn from_canonical(path: PathBuf) -> Result<Self, DomainError> {
        if !path.is_absolute() {
            return Err(DomainError::RelativeAttachmentPath(path));
        }
        Ok(Self(path))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// True when the path names an entry directly inside `root`.
    ///
    /// The attachment layout is flat, so anything in a subdirectory of
    /// `root` does not qualify. `root` must itself be canonical.
    pub fn is_directly_in(&self, root: &Path) -> bool {
        self.0.parent() == Some(root)
    }
}

impl AsRef<Path> for AttachmentPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

// Lets sets of attachment paths be queried with a plain `&Path`.
impl Borrow<Path> for AttachmentPath {
    fn borrow(&self) -> &Path {
        &self.0
    }
}

impl std::fmt::Display for AttachmentPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_relative_path() {
        let result = AttachmentPath::from_canonical(PathBuf::from("parts/PART_1"));
        assert!(matches!(
            result,
            Err(DomainError::RelativeAttachmentPath(_))
        ));
    }

    #[test]
    fn test_is_directly_in_root() {
        let path = AttachmentPath::from_canonical(PathBuf::from("/data/app_parts/PART_1")).unwrap();
        assert!(path.is_directly_in(Path::new("/data/app_parts")));
        assert!(!path.is_directly_in(Path::new("/data/app_parts_old")));
        assert!(!path.is_directly_in(Path::new("/data/other")));
    }

    #[test]
    fn test_nested_path_is_not_directly_in_root() {
        let nested =
            AttachmentPath::from_canonical(PathBuf::from("/data/app_parts/sub/NESTED")).unwrap();
        assert!(!nested.is_directly_in(Path::new("/data/app_parts")));
        assert!(nested.is_directly_in(Path::new("/data/app_parts/sub")));
    }

    #[test]
    fn test_root_is_not_in_itself() {
        let root = AttachmentPath::from_canonical(PathBuf::from("/data/app_parts")).unwrap();
        assert!(!root.is_directly_in(Path::new("/data/app_parts")));
    }
}
