use std::fmt;

use super::transcript_payload::RawTranscriptPayload;

/// Fixed placeholder for a transcription that produced no discernible
/// speech. A normal terminal state, not a failure.
pub const NO_CONTENT_SENTINEL: &str = "（未识别到有效内容）";

/// One diarized span of speech: who spoke and what was recognized.
///
/// Speaker ids are only stable within a single job's sentence sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiarizedSegment {
    pub speaker_id: u32,
    pub text: String,
}

/// A maximal run of consecutive segments from the same speaker, merged
/// into a single dialogue line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueTurn {
    pub speaker_id: u32,
    pub text: String,
}

/// Normalized turn-by-turn dialogue reconstructed from a raw transcript
/// payload. Reconstruction is pure and deterministic given the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogueTranscript {
    /// Speaker-attributed turns in original sequence order.
    Turns(Vec<DialogueTurn>),
    /// Whole-utterance text from a payload without diarized sentences.
    Plain(String),
    /// No sentences and no fallback text anywhere in the payload.
    NoneRecognized,
}

impl DialogueTranscript {
    pub fn reconstruct(payload: &RawTranscriptPayload) -> Self {
        if let Some(segments) = payload.segments() {
            return Self::from_segments(segments);
        }
        match payload.plain_text() {
            Some(text) => Self::Plain(text.to_string()),
            None => Self::NoneRecognized,
        }
    }

    /// Merge consecutive same-speaker segments into turns. Turn boundaries
    /// occur exactly at speaker changes; within a turn the segment texts
    /// are concatenated without any injected separator.
    pub fn from_segments(segments: Vec<DiarizedSegment>) -> Self {
        if segments.is_empty() {
            return Self::NoneRecognized;
        }

        let mut turns: Vec<DialogueTurn> = Vec::new();
        for segment in segments {
            match turns.last_mut() {
                Some(turn) if turn.speaker_id == segment.speaker_id => {
                    turn.text.push_str(&segment.text);
                }
                _ => turns.push(DialogueTurn {
                    speaker_id: segment.speaker_id,
                    text: segment.text,
                }),
            }
        }
        Self::Turns(turns)
    }

    pub fn turns(&self) -> &[DialogueTurn] {
        match self {
            Self::Turns(turns) => turns,
            _ => &[],
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::NoneRecognized)
    }

    /// Canonical display string: one `【说话人 {id}】: {text}` line per
    /// turn, separated by blank lines.
    pub fn render(&self) -> String {
        match self {
            Self::Turns(turns) => turns
                .iter()
                .map(|turn| format!("【说话人 {}】: {}", turn.speaker_id, turn.text))
                .collect::<Vec<_>>()
                .join("\n\n"),
            Self::Plain(text) => text.clone(),
            Self::NoneRecognized => NO_CONTENT_SENTINEL.to_string(),
        }
    }
}

impl fmt::Display for DialogueTranscript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
