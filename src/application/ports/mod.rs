mod audit_extractor;
mod blob_store;
mod record_store;
mod transcription_client;

pub use audit_extractor::{AuditExtractor, ExtractionError};
pub use blob_store::{BlobStore, BlobStoreError};
pub use record_store::{RecordStore, RecordStoreError};
pub use transcription_client::{
    TranscriptionClient, TranscriptionClientError, TranscriptionRequest,
};
