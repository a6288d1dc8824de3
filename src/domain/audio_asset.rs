/// A recorded consultation audio file as handed in by the caller.
///
/// Never persisted by the pipeline itself; external services only ever see
/// the signed URL derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioAsset {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub content_type: AudioContentType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioContentType {
    M4a,
    Mp3,
    Wav,
    Other,
}

impl AudioContentType {
    /// An unrecognized extension is not an error, it only degrades the
    /// content type to a generic binary one.
    pub fn from_filename(filename: &str) -> Self {
        let ext = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "m4a" => Self::M4a,
            "mp3" => Self::Mp3,
            "wav" => Self::Wav,
            _ => Self::Other,
        }
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::M4a => "audio/mp4",
            Self::Mp3 => "audio/mpeg",
            Self::Wav => "audio/wav",
            Self::Other => "application/octet-stream",
        }
    }
}

impl AudioAsset {
    pub fn new(bytes: Vec<u8>, filename: impl Into<String>) -> Self {
        let filename = filename.into();
        let content_type = AudioContentType::from_filename(&filename);
        Self {
            bytes,
            filename,
            content_type,
        }
    }
}
