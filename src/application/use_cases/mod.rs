mod reclaim_attachments;

pub use reclaim_attachments::ReclaimAttachmentsUseCase;
