use crate::traits::{validate_key, ObjectStorage, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::{
    Attribute, Attributes, ObjectStore, ObjectStoreExt, PutPayload, Result as ObjectResult,
    WriteMultipart,
};
use std::pin::Pin;
use tokio::io::{AsyncRead, AsyncReadExt};

const STREAM_CHUNK_BYTES: usize = 8 * 1024 * 1024;
const MAX_IN_FLIGHT_PARTS: usize = 4;

/// Attributes carried on every put so S3 serves the object with the declared
/// content type instead of `binary/octet-stream`.
fn content_attributes(content_type: &str) -> Attributes {
    let mut attributes = Attributes::new();
    attributes.insert(Attribute::ContentType, content_type.to_string().into());
    attributes
}

/// Object storage backed by S3 or an S3-compatible provider.
///
/// Credentials come from the usual AWS environment variables; bucket, region
/// and an optional custom endpoint (MinIO, Spaces, ...) are explicit.
#[derive(Clone)]
pub struct S3Storage {
    store: AmazonS3,
    bucket: String,
    region: String,
    endpoint_url: Option<String>,
}

impl S3Storage {
    pub fn new(
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
    ) -> StorageResult<Self> {
        let mut builder = AmazonS3Builder::from_env()
            .with_region(region.clone())
            .with_bucket_name(bucket.clone());

        if let Some(ref endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(S3Storage {
            store,
            bucket,
            region,
            endpoint_url,
        })
    }

    /// Generate public URL for an S3 object.
    ///
    /// For AWS S3: `https://{bucket}.s3.{region}.amazonaws.com/{key}`.
    /// For S3-compatible providers, path-style from the endpoint:
    /// `{endpoint}/{bucket}/{key}`.
    fn generate_url(&self, key: &str) -> String {
        if let Some(ref endpoint) = self.endpoint_url {
            let base_url = endpoint.trim_end_matches('/');
            format!("{}/{}/{}", base_url, self.bucket, key)
        } else {
            format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                self.bucket, self.region, key
            )
        }
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> StorageResult<String> {
        validate_key(key)?;
        let size = data.len() as u64;
        let bytes = Bytes::from(data);
        let location = Path::from(key.to_string());
        let start = std::time::Instant::now();

        let result: ObjectResult<_> = self
            .store
            .put_opts(
                &location,
                PutPayload::from(bytes),
                content_attributes(content_type).into(),
            )
            .await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 put failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

        let url = self.generate_url(key);

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 put successful"
        );

        Ok(url)
    }

    async fn put_stream(
        &self,
        key: &str,
        content_type: &str,
        mut reader: Pin<Box<dyn AsyncRead + Send + Unpin>>,
    ) -> StorageResult<String> {
        validate_key(key)?;
        let location = Path::from(key.to_string());
        let start = std::time::Instant::now();

        let upload = self
            .store
            .put_multipart_opts(&location, content_attributes(content_type).into())
            .await
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;
        let mut write = WriteMultipart::new_with_chunk_size(upload, STREAM_CHUNK_BYTES);

        let mut buf = vec![0u8; STREAM_CHUNK_BYTES];
        let mut size: u64 = 0;
        loop {
            let n = reader.read(&mut buf).await.map_err(|e| {
                StorageError::UploadFailed(format!("Failed to read from stream: {}", e))
            })?;
            if n == 0 {
                break;
            }
            write
                .wait_for_capacity(MAX_IN_FLIGHT_PARTS)
                .await
                .map_err(|e| StorageError::UploadFailed(e.to_string()))?;
            write.write(&buf[..n]);
            size += n as u64;
        }

        let result: ObjectResult<_> = write.finish().await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 stream put failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

        let url = self.generate_url(key);

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 stream put successful"
        );

        Ok(url)
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        validate_key(key)?;
        let location = Path::from(key.to_string());
        let start = std::time::Instant::now();

        let result: ObjectResult<_> = self.store.delete(&location).await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %key,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 delete failed"
            );
            StorageError::DeleteFailed(e.to_string())
        })?;

        Ok(())
    }

    fn url_for(&self, key: &str) -> String {
        self.generate_url(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_storage() -> S3Storage {
        S3Storage::new("tube-assets".to_string(), "us-east-2".to_string(), None)
            .expect("builder should accept bucket and region")
    }

    #[test]
    fn puts_carry_the_declared_content_type() {
        let attributes = content_attributes("video/mp4");
        let value = attributes
            .get(&Attribute::ContentType)
            .expect("content type attribute set");
        assert_eq!(&**value, "video/mp4");
    }

    #[test]
    fn aws_url_uses_virtual_hosted_style() {
        let storage = test_storage();
        assert_eq!(
            storage.url_for("landscape/abc.mp4"),
            "https://tube-assets.s3.us-east-2.amazonaws.com/landscape/abc.mp4"
        );
    }

    #[test]
    fn compatible_endpoint_uses_path_style() {
        let storage = S3Storage::new(
            "tube-assets".to_string(),
            "us-east-1".to_string(),
            Some("http://localhost:9000/".to_string()),
        )
        .expect("builder should accept custom endpoint");
        assert_eq!(
            storage.url_for("portrait/abc.mp4"),
            "http://localhost:9000/tube-assets/portrait/abc.mp4"
        );
    }
}
