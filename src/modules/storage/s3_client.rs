//! S3 storage client
//!
//! Stores uploads in and lists objects from a single AWS S3 (or
//! S3-compatible) bucket. Uses rust-s3 crate for lightweight S3 operations.

use async_trait::async_trait;
use s3::creds::Credentials;
use s3::{Bucket, Region};
use tracing::{debug, info, warn};

use crate::core::config::StorageConfig;
use crate::modules::storage::{ObjectStore, ObjectSummary, StorageError, StorageResult};

/// Canned ACL header sent with uploads when public reads are enabled
const ACL_HEADER: &str = "x-amz-acl";
const PUBLIC_READ_ACL: &str = "public-read";

/// S3 storage client
pub struct S3Client {
    bucket_name: String,
    /// Bucket handle used for listing
    bucket: Box<Bucket>,
    /// Bucket handle used for uploads, carries the ACL header when enabled
    upload_bucket: Box<Bucket>,
    list_max_keys: usize,
}

impl S3Client {
    /// Create a new S3 client from configuration
    ///
    /// Static credentials are used when configured, otherwise the default
    /// provider chain (environment, profile, instance metadata) is consulted.
    pub fn new(config: &StorageConfig) -> StorageResult<Self> {
        let credentials = match (&config.access_key, &config.secret_key) {
            (Some(access_key), Some(secret_key)) => Credentials::new(
                Some(access_key.as_str()),
                Some(secret_key.as_str()),
                config.session_token.as_deref(),
                None,
                None,
            ),
            _ => Credentials::default(),
        }
        .map_err(|e| StorageError::Config(format!("Failed to load S3 credentials: {}", e)))?;

        let region = resolve_region(config)?;

        let mut bucket = Bucket::new(&config.bucket, region, credentials)
            .map_err(|e| StorageError::Config(format!("Failed to create S3 bucket: {}", e)))?;

        // Use path-style URLs for S3-compatible endpoints (http://endpoint/bucket)
        if config.endpoint.is_some() {
            bucket.set_path_style();
        }

        let mut upload_bucket = bucket.clone();
        if config.public_read {
            upload_bucket.add_header(ACL_HEADER, PUBLIC_READ_ACL);
        }

        info!(
            "S3 client initialized for bucket: {}, region: {}, endpoint: {}, public_read: {}",
            config.bucket,
            config.region,
            config.endpoint.as_deref().unwrap_or("aws"),
            config.public_read
        );

        Ok(Self {
            bucket_name: config.bucket.clone(),
            bucket,
            upload_bucket,
            list_max_keys: config.list_max_keys,
        })
    }
}

/// Region handle for the configured endpoint.
///
/// rust-s3 maps region names it does not know to an endpoint equal to the
/// name itself, so newer AWS regions get their regional endpoint spelled out.
fn resolve_region(config: &StorageConfig) -> StorageResult<Region> {
    if let Some(endpoint) = &config.endpoint {
        return Ok(Region::Custom {
            region: config.region.clone(),
            endpoint: endpoint.clone(),
        });
    }

    let region = config
        .region
        .parse::<Region>()
        .map_err(|e| StorageError::Config(format!("Invalid region '{}': {}", config.region, e)))?;

    Ok(match region {
        Region::Custom { .. } => Region::Custom {
            region: config.region.clone(),
            endpoint: format!("https://s3.{}.amazonaws.com", config.region),
        },
        known => known,
    })
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> StorageResult<()> {
        let size = data.len();
        let response = self
            .upload_bucket
            .put_object_with_content_type(key, &data, content_type)
            .await
            .map_err(|e| {
                warn!("Upload of '{}' failed: {}", key, e);
                StorageError::Upload(format!("Failed to upload file '{}': {}", key, e))
            })?;

        let status = response.status_code();
        if !is_success(status) {
            let body = String::from_utf8_lossy(response.as_slice()).into_owned();
            warn!("Upload of '{}' rejected with status {}", key, status);
            return Err(StorageError::Upload(format!(
                "Failed to upload file '{}': status {} - {}",
                key, status, body
            )));
        }

        debug!(
            "Uploaded file '{}' ({} bytes) to bucket '{}'",
            key,
            size,
            self.bucket_name
        );
        Ok(())
    }

    async fn list(&self) -> StorageResult<Vec<ObjectSummary>> {
        let (page, status) = self
            .bucket
            .list_page(String::new(), None, None, None, Some(self.list_max_keys))
            .await
            .map_err(|e| {
                warn!("Listing bucket '{}' failed: {}", self.bucket_name, e);
                StorageError::List(format!(
                    "Failed to list bucket '{}': {}",
                    self.bucket_name,
                    e
                ))
            })?;

        if !is_success(status) {
            warn!(
                "Listing bucket '{}' rejected with status {}",
                self.bucket_name,
                status
            );
            return Err(StorageError::List(format!(
                "Failed to list bucket '{}': status {}",
                self.bucket_name,
                status
            )));
        }

        if page.is_truncated {
            debug!(
                "Listing of bucket '{}' truncated at {} keys",
                self.bucket_name,
                page.contents.len()
            );
        }

        Ok(page
            .contents
            .into_iter()
            .map(|object| ObjectSummary {
                key: object.key,
                size: object.size,
                last_modified: Some(object.last_modified).filter(|s| !s.is_empty()),
            })
            .collect())
    }

    fn container(&self) -> &str {
        &self.bucket_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::test_storage_config;

    fn region_for(name: &str, endpoint: Option<&str>) -> Region {
        let mut config = test_storage_config();
        config.region = name.to_string();
        config.endpoint = endpoint.map(str::to_string);
        resolve_region(&config).unwrap()
    }

    #[test]
    fn test_known_region_uses_builtin_endpoint() {
        let region = region_for("us-east-1", None);
        assert_eq!(region.endpoint(), "s3.amazonaws.com");
    }

    #[test]
    fn test_unlisted_aws_region_gets_regional_endpoint() {
        for name in ["mx-central-1", "ap-southeast-5"] {
            let region = region_for(name, None);
            assert_eq!(
                region.endpoint(),
                format!("https://s3.{}.amazonaws.com", name)
            );
            assert_eq!(region.to_string(), name);
        }
    }

    #[test]
    fn test_custom_endpoint_is_kept() {
        let region = region_for("auto", Some("http://localhost:9000"));
        assert_eq!(region.endpoint(), "http://localhost:9000");
        assert_eq!(region.to_string(), "auto");
    }

    #[test]
    fn test_status_classification() {
        assert!(is_success(200));
        assert!(is_success(204));
        assert!(!is_success(301));
        assert!(!is_success(403));
        assert!(!is_success(500));
    }
}
