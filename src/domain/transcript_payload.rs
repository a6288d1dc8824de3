use serde::Deserialize;

use super::dialogue::DiarizedSegment;

/// Raw result document returned by the transcription service.
///
/// The service is inconsistent across response variants: the sentence list
/// may live under `transcripts[0]` or `results[0]`. Both shapes are accepted
/// and tried in that order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTranscriptPayload {
    #[serde(default)]
    pub transcripts: Vec<TranscriptSection>,
    #[serde(default)]
    pub results: Vec<TranscriptSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranscriptSection {
    #[serde(default)]
    pub sentences: Vec<RawSentence>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSentence {
    #[serde(default)]
    pub speaker_id: u32,
    #[serde(default)]
    pub text: String,
}

impl RawTranscriptPayload {
    /// Candidate sections in acceptance order.
    fn sections(&self) -> impl Iterator<Item = &TranscriptSection> {
        self.transcripts.iter().chain(self.results.iter())
    }

    /// First non-empty diarized sentence list, if any.
    pub fn segments(&self) -> Option<Vec<DiarizedSegment>> {
        self.sections()
            .find(|section| !section.sentences.is_empty())
            .map(|section| {
                section
                    .sentences
                    .iter()
                    .map(|s| DiarizedSegment {
                        speaker_id: s.speaker_id,
                        text: s.text.clone(),
                    })
                    .collect()
            })
    }

    /// Whole-utterance fallback text, when no section carries sentences.
    /// A present-but-blank `text` counts as absent.
    pub fn plain_text(&self) -> Option<&str> {
        self.sections()
            .filter_map(|section| section.text.as_deref())
            .map(str::trim)
            .find(|text| !text.is_empty())
    }
}
