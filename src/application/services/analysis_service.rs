use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{
    AuditExtractor, BlobStore, BlobStoreError, ExtractionError, TranscriptionClient,
    TranscriptionClientError, TranscriptionRequest,
};
use crate::domain::{ConsultationReport, DialogueTranscript, JobStatus};

/// Pipeline tuning knobs. Defaults match the production service: two
/// expected speakers, Mandarin with English fallback, 2-second polling.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub language_hints: Vec<String>,
    pub speaker_count: u32,
    pub poll_interval: Duration,
    /// Ceiling on the whole polling wait. The external service offers no
    /// bound of its own, so an unbounded wait would be an operational risk.
    pub poll_timeout: Duration,
    /// Transcripts shorter than this are rejected as unusable input.
    pub min_transcript_chars: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            language_hints: vec!["zh".to_string(), "en".to_string()],
            speaker_count: 2,
            poll_interval: Duration::from_secs(2),
            poll_timeout: Duration::from_secs(600),
            min_transcript_chars: 12,
        }
    }
}

/// Terminal output of one successful pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsultationAnalysis {
    pub report: ConsultationReport,
    pub dialogue: DialogueTranscript,
}

/// Sequences upload, transcription, dialogue reconstruction and audit
/// extraction behind a single `analyze` call.
///
/// All-or-nothing per invocation: the first failing stage short-circuits
/// and no partial state is returned. Retrying means re-running the whole
/// pipeline; job ids are not checkpointed across invocations. Invocations
/// share no mutable state, and the polling wait suspends on the timer, so
/// one caller's job never stalls another. Dropping the returned future
/// stops polling; the remote job runs on regardless.
pub struct AnalysisService<B, T, A>
where
    B: BlobStore,
    T: TranscriptionClient,
    A: AuditExtractor,
{
    blob_store: Arc<B>,
    transcription: Arc<T>,
    extractor: Arc<A>,
    config: AnalysisConfig,
}

impl<B, T, A> AnalysisService<B, T, A>
where
    B: BlobStore,
    T: TranscriptionClient,
    A: AuditExtractor,
{
    pub fn new(
        blob_store: Arc<B>,
        transcription: Arc<T>,
        extractor: Arc<A>,
        config: AnalysisConfig,
    ) -> Self {
        Self {
            blob_store,
            transcription,
            extractor,
            config,
        }
    }

    pub async fn analyze(
        &self,
        audio: &[u8],
        filename: &str,
    ) -> Result<ConsultationAnalysis, AnalysisError> {
        let audio_url = self.blob_store.upload(audio, filename).await?;
        tracing::debug!(filename, "Recording uploaded");

        let request = TranscriptionRequest {
            language_hints: self.config.language_hints.clone(),
            speaker_count: self.config.speaker_count,
        };
        let mut job = self.transcription.submit(&audio_url, &request).await?;
        tracing::info!(job_id = %job.id, "Transcription job submitted");

        let deadline = tokio::time::Instant::now() + self.config.poll_timeout;
        while !job.status.is_terminal() {
            if tokio::time::Instant::now() >= deadline {
                return Err(AnalysisError::PollTimeout(self.config.poll_timeout));
            }
            tokio::time::sleep(self.config.poll_interval).await;
            job = self.transcription.poll(&job).await?;
            tracing::debug!(job_id = %job.id, status = %job.status, "Polled transcription job");
        }

        if job.status == JobStatus::Failed {
            let reason = job
                .error_message
                .unwrap_or_else(|| "no failure message reported".to_string());
            return Err(AnalysisError::TranscriptionFailed(reason));
        }

        let payload = self.transcription.fetch_result(&job).await?;
        let dialogue = DialogueTranscript::reconstruct(&payload);
        let dialogue_text = dialogue.render();

        let char_count = dialogue_text.chars().count();
        if !dialogue.is_recognized() || char_count < self.config.min_transcript_chars {
            return Err(AnalysisError::LowQualityTranscript(char_count));
        }

        let report = self.extractor.extract(&dialogue_text).await?;
        tracing::info!(
            job_id = %job.id,
            sales_score = report.sales_score,
            "Consultation analysis completed"
        );

        Ok(ConsultationAnalysis { report, dialogue })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("storage: {0}")]
    Storage(#[from] BlobStoreError),
    #[error("transcription: {0}")]
    Transcription(#[from] TranscriptionClientError),
    #[error("transcription job failed: {0}")]
    TranscriptionFailed(String),
    #[error("transcription did not reach a terminal state within {0:?}")]
    PollTimeout(Duration),
    #[error("transcript too short to audit ({0} chars)")]
    LowQualityTranscript(usize),
    #[error("extraction: {0}")]
    Extraction(#[from] ExtractionError),
}
