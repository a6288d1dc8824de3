use std::time::Duration;

use bytes::Bytes;
use chrono::Utc;
use http::Method;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path as StorePath;
use object_store::signer::Signer;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions, PutPayload};

use crate::application::ports::{BlobStore, BlobStoreError};
use crate::domain::{AudioContentType, SignedFetchUrl};

/// Blob store adapter for an Alibaba OSS bucket, driven through the
/// bucket's S3-compatible endpoint.
pub struct OssBlobStore {
    inner: AmazonS3,
    url_ttl: Duration,
}

impl OssBlobStore {
    pub fn new(
        endpoint: &str,
        region: &str,
        bucket: &str,
        access_key_id: &str,
        access_key_secret: &str,
        url_ttl: Duration,
    ) -> Result<Self, BlobStoreError> {
        let store = AmazonS3Builder::new()
            .with_endpoint(endpoint)
            .with_region(region)
            .with_bucket_name(bucket)
            .with_access_key_id(access_key_id)
            .with_secret_access_key(access_key_secret)
            .with_virtual_hosted_style_request(true)
            .build()
            .map_err(|e| BlobStoreError::Unavailable(e.to_string()))?;

        Ok(Self {
            inner: store,
            url_ttl,
        })
    }

    /// Timestamp-prefixed object keys keep concurrent uploads of the same
    /// filename from colliding.
    fn object_key(filename: &str) -> String {
        format!("recordings/{}_{}", Utc::now().timestamp(), filename)
    }
}

#[async_trait::async_trait]
impl BlobStore for OssBlobStore {
    async fn upload(&self, data: &[u8], filename: &str) -> Result<SignedFetchUrl, BlobStoreError> {
        let key = Self::object_key(filename);
        let store_path = StorePath::from(key.as_str());

        let mime = AudioContentType::from_filename(filename).as_mime();
        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, mime.into());
        let options = PutOptions {
            attributes,
            ..Default::default()
        };

        let payload = PutPayload::from(Bytes::copy_from_slice(data));
        self.inner
            .put_opts(&store_path, payload, options)
            .await
            .map_err(|e| BlobStoreError::Unavailable(e.to_string()))?;

        tracing::debug!(key = %key, content_type = mime, bytes = data.len(), "Recording stored");

        let url = self
            .inner
            .signed_url(Method::GET, &store_path, self.url_ttl)
            .await
            .map_err(|e| BlobStoreError::SigningFailed(e.to_string()))?;

        let expires_at = Utc::now()
            + chrono::Duration::from_std(self.url_ttl)
                .map_err(|e| BlobStoreError::SigningFailed(e.to_string()))?;

        Ok(SignedFetchUrl::new(url.to_string(), expires_at))
    }
}
