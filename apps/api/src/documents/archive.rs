use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use crate::config::Config;
use crate::documents::extractor::DocumentKind;

/// Archive of original résumé uploads for signed-in users.
/// Disabled when no bucket is configured.
#[derive(Clone)]
pub struct UploadArchive {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl UploadArchive {
    /// Constructs an S3 client for MinIO (custom endpoint, path-style) or AWS.
    /// Credentials come from the standard AWS provider chain.
    pub async fn from_config(config: &Config) -> Option<Self> {
        let bucket = config.s3_bucket.clone()?;

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.aws_region.clone()));
        if let Some(endpoint) = &config.s3_endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        let sdk_config = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.s3_endpoint.is_some())
            .build();

        info!("Upload archive enabled (bucket: {bucket})");
        Some(Self {
            client: aws_sdk_s3::Client::from_conf(s3_config),
            bucket,
        })
    }

    /// Stores the upload and returns its object key.
    pub async fn store(&self, uid: &str, body: Bytes, kind: DocumentKind) -> Result<String> {
        let key = object_key(uid, Uuid::new_v4(), kind);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(body))
            .content_type(kind.content_type())
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("S3 upload failed: {e}"))?;

        info!("Archived upload to s3://{}/{}", self.bucket, key);
        Ok(key)
    }
}

pub fn object_key(uid: &str, id: Uuid, kind: DocumentKind) -> String {
    format!("resumes/{}/{}.{}", uid, id, kind.extension())
}
