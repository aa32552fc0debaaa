mod attachment_directory;
mod reference_store;

pub use attachment_directory::{AttachmentDirectory, StorageError};
pub use reference_store::{ReferenceSink, ReferenceStore, RepositoryError};

#[cfg(test)]
pub use attachment_directory::MockAttachmentDirectory;
