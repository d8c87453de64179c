//! Object storage for generated images.
//!
//! Two backends implement [`ObjectStore`]: a local directory served by the
//! API under `/media`, and an S3-compatible bucket with a public base URL.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

pub mod local;
pub mod s3;

pub use local::LocalObjectStore;
pub use s3::S3ObjectStore;

/// Errors from the object storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Filesystem failure in the local backend.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The remote backend rejected or failed the upload.
    #[error("Upload failed: {0}")]
    Upload(String),

    /// The object path would escape the storage root.
    #[error("Invalid object path: {0}")]
    InvalidPath(String),
}

/// Stores bytes and hands back a publicly resolvable URL.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write `data` at `path` (relative, `/`-separated) and return its public URL.
    async fn upload(
        &self,
        path: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError>;
}

/// Object key for an idea's generated image: `{idea_id}/{unix_millis}.png`.
pub fn image_object_path(idea_id: Uuid, unix_millis: i64) -> String {
    format!("{idea_id}/{unix_millis}.png")
}

/// Join a public base URL and an object path with exactly one slash.
pub(crate) fn public_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Reject paths that are absolute or contain `..` / empty segments.
pub(crate) fn validate_object_path(path: &str) -> Result<(), StorageError> {
    let bad = path.is_empty()
        || path.starts_with('/')
        || path.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..");
    if bad {
        return Err(StorageError::InvalidPath(path.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Default directory for the local backend.
const DEFAULT_LOCAL_ROOT: &str = "./media";
/// Default public URL for the local backend.
const DEFAULT_LOCAL_PUBLIC_URL: &str = "http://localhost:3000/media";
/// Default bucket name for the S3 backend.
const DEFAULT_BUCKET: &str = "idea-images";

/// Which backend to use and how to reach it.
#[derive(Debug, Clone)]
pub enum StorageConfig {
    Local {
        root: PathBuf,
        public_url: String,
    },
    S3 {
        bucket: String,
        region: Option<String>,
        /// Custom endpoint for S3-compatible services; enables path-style addressing.
        endpoint: Option<String>,
        public_url: String,
        access_key_id: Option<String>,
        secret_access_key: Option<String>,
    },
}

impl StorageConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                | Default                         |
    /// |------------------------|---------------------------------|
    /// | `STORAGE_BACKEND`      | `local` (`local` or `s3`)       |
    /// | `STORAGE_LOCAL_ROOT`   | `./media`                       |
    /// | `STORAGE_PUBLIC_URL`   | `http://localhost:3000/media` for local, derived from the bucket for s3 |
    /// | `S3_BUCKET`            | `idea-images`                   |
    /// | `S3_REGION`            | SDK default chain               |
    /// | `S3_ENDPOINT`          | AWS                             |
    /// | `S3_ACCESS_KEY_ID`     | SDK default chain               |
    /// | `S3_SECRET_ACCESS_KEY` | SDK default chain               |
    ///
    /// # Panics
    ///
    /// Panics if `STORAGE_BACKEND` is neither `local` nor `s3`.
    pub fn from_env() -> Self {
        let backend = std::env::var("STORAGE_BACKEND").unwrap_or_else(|_| "local".into());
        let public_url = std::env::var("STORAGE_PUBLIC_URL").ok();

        match backend.as_str() {
            "local" => StorageConfig::Local {
                root: std::env::var("STORAGE_LOCAL_ROOT")
                    .unwrap_or_else(|_| DEFAULT_LOCAL_ROOT.into())
                    .into(),
                public_url: public_url.unwrap_or_else(|| DEFAULT_LOCAL_PUBLIC_URL.into()),
            },
            "s3" => {
                let bucket = std::env::var("S3_BUCKET").unwrap_or_else(|_| DEFAULT_BUCKET.into());
                let region = std::env::var("S3_REGION").ok();
                let endpoint = std::env::var("S3_ENDPOINT").ok();
                let public_url = public_url.unwrap_or_else(|| {
                    s3::default_public_url(&bucket, region.as_deref(), endpoint.as_deref())
                });
                StorageConfig::S3 {
                    bucket,
                    region,
                    endpoint,
                    public_url,
                    access_key_id: std::env::var("S3_ACCESS_KEY_ID").ok(),
                    secret_access_key: std::env::var("S3_SECRET_ACCESS_KEY").ok(),
                }
            }
            other => panic!("STORAGE_BACKEND must be 'local' or 's3', got '{other}'"),
        }
    }

    /// Local directory to serve under `/media`, if the local backend is active.
    pub fn local_root(&self) -> Option<&PathBuf> {
        match self {
            StorageConfig::Local { root, .. } => Some(root),
            StorageConfig::S3 { .. } => None,
        }
    }
}

/// Build the configured backend.
pub async fn connect(config: &StorageConfig) -> Result<Arc<dyn ObjectStore>, StorageError> {
    match config {
        StorageConfig::Local { root, public_url } => {
            let store = LocalObjectStore::new(root.clone(), public_url.clone()).await?;
            tracing::info!(root = %root.display(), "Using local object storage");
            Ok(Arc::new(store))
        }
        StorageConfig::S3 { bucket, .. } => {
            let store = S3ObjectStore::from_config(config).await?;
            tracing::info!(bucket = %bucket, "Using S3 object storage");
            Ok(Arc::new(store))
        }
    }
}
