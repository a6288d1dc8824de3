use async_trait::async_trait;

use crate::domain::{RawTranscriptPayload, SignedFetchUrl, TranscriptionJob};

/// Diarization parameters for one submission.
#[derive(Debug, Clone)]
pub struct TranscriptionRequest {
    pub language_hints: Vec<String>,
    pub speaker_count: u32,
}

impl Default for TranscriptionRequest {
    fn default() -> Self {
        Self {
            language_hints: vec!["zh".to_string(), "en".to_string()],
            // Consultant plus patient.
            speaker_count: 2,
        }
    }
}

/// Client for an asynchronous external transcription service.
///
/// `poll` is an idempotent status read; driving the job to a terminal
/// state is the orchestrator's concern. A transport fault never degrades
/// into empty data.
#[async_trait]
pub trait TranscriptionClient: Send + Sync {
    async fn submit(
        &self,
        audio_url: &SignedFetchUrl,
        request: &TranscriptionRequest,
    ) -> Result<TranscriptionJob, TranscriptionClientError>;

    async fn poll(
        &self,
        job: &TranscriptionJob,
    ) -> Result<TranscriptionJob, TranscriptionClientError>;

    async fn fetch_result(
        &self,
        job: &TranscriptionJob,
    ) -> Result<RawTranscriptPayload, TranscriptionClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionClientError {
    #[error("submission rejected: {0}")]
    SubmitRejected(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
