use async_trait::async_trait;

use crate::domain::ConsultationReport;

/// Schema-constrained audit extraction over a dialogue transcript.
///
/// Implementations must reject empty input before spending a model call,
/// and must fail on any field-level schema mismatch rather than coerce.
#[async_trait]
pub trait AuditExtractor: Send + Sync {
    async fn extract(&self, dialogue_text: &str) -> Result<ConsultationReport, ExtractionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("empty transcript, nothing to audit")]
    EmptyInput,
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("response does not match report schema: {0}")]
    SchemaMismatch(String),
}
