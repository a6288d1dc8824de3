use async_trait::async_trait;

use crate::domain::ConsultationRecord;

/// Append-only log of analyzed consultations.
///
/// The store serializes concurrent appends itself; readers get records in
/// append order.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn append(&self, record: &ConsultationRecord) -> Result<(), RecordStoreError>;

    async fn load_all(&self) -> Result<Vec<ConsultationRecord>, RecordStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RecordStoreError {
    #[error("write failed: {0}")]
    WriteFailed(String),
    #[error("read failed: {0}")]
    ReadFailed(String),
    #[error("malformed record at line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}
