use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Listing failed: {0}")]
    List(String),

    #[error("Storage configuration error: {0}")]
    Config(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// One entry of a bucket listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSummary {
    pub key: String,
    pub size: u64,
    /// Timestamp as reported by the store (RFC 3339 for S3)
    pub last_modified: Option<String>,
}

#[cfg(test)]
impl ObjectSummary {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            size: 0,
            last_modified: None,
        }
    }
}

/// Object store bound to a single container.
///
/// Implementations never retry; every failure is reported to the caller as is.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `data` under `key`, replacing any existing object
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> StorageResult<()>;

    /// List objects in store order. Only the first page is returned.
    async fn list(&self) -> StorageResult<Vec<ObjectSummary>>;

    /// Name of the container this store writes to
    fn container(&self) -> &str;
}
