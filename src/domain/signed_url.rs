use std::fmt;

use chrono::{DateTime, Utc};

/// Time-limited read URL for an uploaded recording.
///
/// Consumed exactly once, by the transcription job submission; must stay
/// valid for longer than the longest expected transcription run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedFetchUrl {
    url: String,
    expires_at: DateTime<Utc>,
}

impl SignedFetchUrl {
    pub fn new(url: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            url: url.into(),
            expires_at,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

impl fmt::Display for SignedFetchUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
