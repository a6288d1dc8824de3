use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use crate::application::ports::{RecordStore, RecordStoreError};
use crate::domain::ConsultationRecord;

/// Flat-file record store: one JSON document per line, append-only.
pub struct JsonlRecordStore {
    path: PathBuf,
}

impl JsonlRecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, RecordStoreError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| *p != Path::new("")) {
            std::fs::create_dir_all(parent)
                .map_err(|e| RecordStoreError::WriteFailed(e.to_string()))?;
        }
        Ok(Self { path })
    }
}

#[async_trait::async_trait]
impl RecordStore for JsonlRecordStore {
    async fn append(&self, record: &ConsultationRecord) -> Result<(), RecordStoreError> {
        let mut line = serde_json::to_string(record)
            .map_err(|e| RecordStoreError::WriteFailed(e.to_string()))?;
        line.push('\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| RecordStoreError::WriteFailed(e.to_string()))?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| RecordStoreError::WriteFailed(e.to_string()))?;
        file.flush()
            .await
            .map_err(|e| RecordStoreError::WriteFailed(e.to_string()))?;

        tracing::debug!(path = %self.path.display(), "Consultation record appended");

        Ok(())
    }

    async fn load_all(&self) -> Result<Vec<ConsultationRecord>, RecordStoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(RecordStoreError::ReadFailed(e.to_string())),
        };

        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                serde_json::from_str(line).map_err(|e| RecordStoreError::Malformed {
                    line: idx + 1,
                    reason: e.to_string(),
                })
            })
            .collect()
    }
}
