mod audio_asset;
mod consultation_record;
mod dialogue;
mod report;
mod signed_url;
mod transcript_payload;
mod transcription_job;

pub use audio_asset::{AudioAsset, AudioContentType};
pub use consultation_record::ConsultationRecord;
pub use dialogue::{DialogueTranscript, DialogueTurn, DiarizedSegment, NO_CONTENT_SENTINEL};
pub use report::{ConsultationReport, ReportValidationError};
pub use signed_url::SignedFetchUrl;
pub use transcript_payload::{RawSentence, RawTranscriptPayload, TranscriptSection};
pub use transcription_job::{JobId, JobStatus, TranscriptionJob};
