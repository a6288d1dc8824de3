use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{
    TranscriptionClient, TranscriptionClientError, TranscriptionRequest,
};
use crate::domain::{JobId, JobStatus, RawTranscriptPayload, SignedFetchUrl, TranscriptionJob};

/// DashScope asynchronous file-transcription client (paraformer models
/// with speaker diarization).
///
/// Submission goes through the recording-file transcription endpoint with
/// the async header set; status reads go through the generic task endpoint.
/// A succeeded task usually externalizes its sentence list behind a
/// `transcription_url`, in which case fetching the result is a second,
/// independently failing stage.
pub struct ParaformerClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl ParaformerClient {
    pub fn new(base_url: &str, api_key: &str, model: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }
}

#[derive(Serialize)]
struct SubmitBody<'a> {
    model: &'a str,
    input: SubmitInput<'a>,
    parameters: SubmitParameters<'a>,
}

#[derive(Serialize)]
struct SubmitInput<'a> {
    file_urls: [&'a str; 1],
}

#[derive(Serialize)]
struct SubmitParameters<'a> {
    language_hints: &'a [String],
    diarization_enabled: bool,
    speaker_count: u32,
}

#[derive(Deserialize)]
struct TaskEnvelope {
    output: TaskOutput,
}

#[derive(Deserialize)]
struct TaskOutput {
    task_id: String,
    task_status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    results: Vec<TaskFileResult>,
}

#[derive(Deserialize)]
struct TaskFileResult {
    #[serde(default)]
    transcription_url: Option<String>,
}

impl TaskOutput {
    fn into_job(self) -> TranscriptionJob {
        // Statuses this client does not know yet are treated as still
        // running so the polling loop keeps going.
        let status = self.task_status.parse().unwrap_or_else(|_| {
            tracing::warn!(status = %self.task_status, "Unknown task status, treating as running");
            JobStatus::Running
        });
        let result_url = self
            .results
            .into_iter()
            .find_map(|r| r.transcription_url);
        TranscriptionJob {
            id: JobId::new(self.task_id),
            status,
            result_url,
            error_message: self.message,
        }
    }
}

#[async_trait]
impl TranscriptionClient for ParaformerClient {
    async fn submit(
        &self,
        audio_url: &SignedFetchUrl,
        request: &TranscriptionRequest,
    ) -> Result<TranscriptionJob, TranscriptionClientError> {
        let url = format!(
            "{}/api/v1/services/audio/asr/transcription",
            self.base_url
        );
        let body = SubmitBody {
            model: &self.model,
            input: SubmitInput {
                file_urls: [audio_url.as_str()],
            },
            parameters: SubmitParameters {
                language_hints: &request.language_hints,
                diarization_enabled: true,
                speaker_count: request.speaker_count,
            },
        };

        tracing::debug!(model = %self.model, "Submitting transcription job");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("X-DashScope-Async", "enable")
            .json(&body)
            .send()
            .await
            .map_err(|e| TranscriptionClientError::ApiRequestFailed(format!("submit: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriptionClientError::SubmitRejected(format!(
                "status {}: {}",
                status, body
            )));
        }

        let envelope: TaskEnvelope = response
            .json()
            .await
            .map_err(|e| TranscriptionClientError::InvalidResponse(format!("submit body: {}", e)))?;

        Ok(envelope.output.into_job())
    }

    async fn poll(
        &self,
        job: &TranscriptionJob,
    ) -> Result<TranscriptionJob, TranscriptionClientError> {
        let url = format!("{}/api/v1/tasks/{}", self.base_url, job.id);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| TranscriptionClientError::ApiRequestFailed(format!("poll: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriptionClientError::ApiRequestFailed(format!(
                "poll status {}: {}",
                status, body
            )));
        }

        let envelope: TaskEnvelope = response
            .json()
            .await
            .map_err(|e| TranscriptionClientError::InvalidResponse(format!("poll body: {}", e)))?;

        Ok(envelope.output.into_job())
    }

    async fn fetch_result(
        &self,
        job: &TranscriptionJob,
    ) -> Result<RawTranscriptPayload, TranscriptionClientError> {
        match &job.result_url {
            Some(result_url) => {
                tracing::debug!(job_id = %job.id, "Fetching externalized transcript");
                let response = self.client.get(result_url).send().await.map_err(|e| {
                    TranscriptionClientError::ApiRequestFailed(format!("result fetch: {}", e))
                })?;

                if !response.status().is_success() {
                    let status = response.status();
                    let body = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "unknown error".to_string());
                    return Err(TranscriptionClientError::ApiRequestFailed(format!(
                        "result status {}: {}",
                        status, body
                    )));
                }

                response.json().await.map_err(|e| {
                    TranscriptionClientError::InvalidResponse(format!("result body: {}", e))
                })
            }
            // Some response variants inline the transcript in the task
            // output itself; re-read the task and parse it as a payload.
            None => {
                let url = format!("{}/api/v1/tasks/{}", self.base_url, job.id);
                let response = self
                    .client
                    .get(&url)
                    .bearer_auth(&self.api_key)
                    .send()
                    .await
                    .map_err(|e| {
                        TranscriptionClientError::ApiRequestFailed(format!("result fetch: {}", e))
                    })?;

                if !response.status().is_success() {
                    let status = response.status();
                    let body = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "unknown error".to_string());
                    return Err(TranscriptionClientError::ApiRequestFailed(format!(
                        "result status {}: {}",
                        status, body
                    )));
                }

                let value: serde_json::Value = response.json().await.map_err(|e| {
                    TranscriptionClientError::InvalidResponse(format!("result body: {}", e))
                })?;
                let output = value.get("output").cloned().ok_or_else(|| {
                    TranscriptionClientError::InvalidResponse("missing task output".to_string())
                })?;
                serde_json::from_value(output).map_err(|e| {
                    TranscriptionClientError::InvalidResponse(format!("inline transcript: {}", e))
                })
            }
        }
    }
}
