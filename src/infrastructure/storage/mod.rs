mod local_attachment_directory;

pub use local_attachment_directory::LocalAttachmentDirectory;
