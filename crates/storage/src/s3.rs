//! S3-compatible object store (AWS, MinIO, Supabase Storage, R2).

use async_trait::async_trait;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;

use crate::{public_url, validate_object_path, ObjectStore, StorageConfig, StorageError};

/// Uploads objects to one bucket and exposes them through a public base URL.
pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_url: String,
}

impl S3ObjectStore {
    /// Wrap an already-configured SDK client.
    pub fn new(client: aws_sdk_s3::Client, bucket: String, public_url: String) -> Self {
        Self {
            client,
            bucket,
            public_url,
        }
    }

    /// Build the SDK client from [`StorageConfig::S3`].
    pub async fn from_config(config: &StorageConfig) -> Result<Self, StorageError> {
        let StorageConfig::S3 {
            bucket,
            region,
            endpoint,
            public_url,
            access_key_id,
            secret_access_key,
        } = config
        else {
            return Err(StorageError::Upload(
                "S3 store requires an s3 storage configuration".to_string(),
            ));
        };

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let (Some(key), Some(secret)) = (access_key_id, secret_access_key) {
            loader = loader.credentials_provider(Credentials::new(
                key.clone(),
                secret.clone(),
                None,
                None,
                "posty-env",
            ));
        }
        let shared = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared);
        if let Some(endpoint) = endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }
        let client = aws_sdk_s3::Client::from_conf(builder.build());

        Ok(Self::new(client, bucket.clone(), public_url.clone()))
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn upload(
        &self,
        path: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        validate_object_path(path)?;
        let size = data.len();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(path)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| StorageError::Upload(DisplayErrorContext(e).to_string()))?;

        tracing::debug!(bucket = %self.bucket, path, bytes = size, "Uploaded object to S3");
        Ok(public_url(&self.public_url, path))
    }
}

/// Public URL prefix when `STORAGE_PUBLIC_URL` is not set.
///
/// Custom endpoints use path-style `{endpoint}/{bucket}`; AWS uses the
/// virtual-hosted bucket domain.
pub fn default_public_url(bucket: &str, region: Option<&str>, endpoint: Option<&str>) -> String {
    match (endpoint, region) {
        (Some(endpoint), _) => format!("{}/{bucket}", endpoint.trim_end_matches('/')),
        (None, Some(region)) => format!("https://{bucket}.s3.{region}.amazonaws.com"),
        (None, None) => format!("https://{bucket}.s3.amazonaws.com"),
    }
}
