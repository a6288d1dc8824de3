use async_trait::async_trait;

use crate::domain::SignedFetchUrl;

/// Durable blob store with signed read URLs.
///
/// One remote write per upload, no other side effects. Object keys must be
/// unique per upload so concurrent callers cannot collide.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn upload(&self, data: &[u8], filename: &str) -> Result<SignedFetchUrl, BlobStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum BlobStoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("url signing failed: {0}")]
    SigningFailed(String),
}
