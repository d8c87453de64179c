//! Filesystem-backed object store.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::{public_url, validate_object_path, ObjectStore, StorageError};

/// Writes objects under a root directory that is served over HTTP.
pub struct LocalObjectStore {
    root: PathBuf,
    public_url: String,
}

impl LocalObjectStore {
    /// Create the store, making sure `root` exists.
    pub async fn new(root: PathBuf, public_url: String) -> Result<Self, StorageError> {
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root, public_url })
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn upload(
        &self,
        path: &str,
        data: Vec<u8>,
        _content_type: &str,
    ) -> Result<String, StorageError> {
        validate_object_path(path)?;
        let target = self.root.join(path);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, &data).await?;

        tracing::debug!(path, bytes = data.len(), "Stored object locally");
        Ok(public_url(&self.public_url, path))
    }
}
