#[cfg(test)]
use crate::core::config::StorageConfig;
#[cfg(test)]
use crate::modules::storage::{ObjectStore, ObjectSummary, StorageError, StorageResult};
#[cfg(test)]
use async_trait::async_trait;
#[cfg(test)]
use std::sync::Mutex;

#[cfg(test)]
pub fn test_storage_config() -> StorageConfig {
    StorageConfig {
        bucket: "mybucket".to_string(),
        region: "us-east-1".to_string(),
        access_key: None,
        secret_key: None,
        session_token: None,
        endpoint: None,
        public_endpoint: None,
        public_read: true,
        list_max_keys: 1000,
    }
}

/// A put call captured by `RecordingStore`
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct PutCall {
    pub key: String,
    pub data: Vec<u8>,
    pub content_type: String,
}

/// In-memory `ObjectStore` that records uploads and serves a canned listing
#[cfg(test)]
#[derive(Default)]
pub struct RecordingStore {
    puts: Mutex<Vec<PutCall>>,
    listing: Vec<ObjectSummary>,
    fail_put: Option<String>,
    fail_list: Option<String>,
}

#[cfg(test)]
impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listing(keys: &[&str]) -> Self {
        Self {
            listing: keys.iter().map(|k| ObjectSummary::new(*k)).collect(),
            ..Self::default()
        }
    }

    pub fn failing_put(message: &str) -> Self {
        Self {
            fail_put: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn failing_list(message: &str) -> Self {
        Self {
            fail_list: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn puts(&self) -> Vec<PutCall> {
        self.puts.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl ObjectStore for RecordingStore {
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> StorageResult<()> {
        self.puts.lock().unwrap().push(PutCall {
            key: key.to_string(),
            data,
            content_type: content_type.to_string(),
        });
        match &self.fail_put {
            Some(message) => Err(StorageError::Upload(message.clone())),
            None => Ok(()),
        }
    }

    async fn list(&self) -> StorageResult<Vec<ObjectSummary>> {
        match &self.fail_list {
            Some(message) => Err(StorageError::List(message.clone())),
            None => Ok(self.listing.clone()),
        }
    }

    fn container(&self) -> &str {
        "mybucket"
    }
}
