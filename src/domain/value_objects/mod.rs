mod attachment_path;
mod attachment_reference;
mod execution_mode;
mod path_matching;
mod reference_column;

pub use attachment_path::AttachmentPath;
pub use attachment_reference::AttachmentReference;
pub use execution_mode::ExecutionMode;
pub use path_matching::PathMatching;
pub use reference_column::ReferenceColumn;
