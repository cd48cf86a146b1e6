use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::core::config::StorageConfig;
use crate::features::uploads::dtos::{
    format_last_modified, ListedFileDto, ListingView, UploadOutcome, UploadedFile,
};
use crate::features::uploads::models::StoredObject;
use crate::modules::storage::{ObjectStore, PublicUrlBuilder};

/// Service for uploading files to and listing files in the configured bucket
pub struct UploadService {
    store: Arc<dyn ObjectStore>,
    urls: PublicUrlBuilder,
}

impl UploadService {
    pub fn new(store: Arc<dyn ObjectStore>, config: &StorageConfig) -> Self {
        Self {
            store,
            urls: PublicUrlBuilder::new(config),
        }
    }

    /// Store an uploaded file under a freshly generated key
    ///
    /// Nothing is sent to the store when `file` is `None`. Store failures are
    /// returned as `UploadOutcome::Failed` with the store's message; there is
    /// no retry.
    pub async fn upload(&self, file: Option<UploadedFile>) -> UploadOutcome {
        let Some(file) = file else {
            debug!("Upload submitted without a file");
            return UploadOutcome::NoFileSelected;
        };

        let object = StoredObject::for_upload(self.store.container(), &file.file_name);
        let size = file.data.len();

        match self
            .store
            .put(&object.key, file.data, &file.content_type)
            .await
        {
            Ok(()) => {
                let url = self.urls.object_url(&object.key);
                info!(
                    "File uploaded: key={}, container={}, size={}",
                    object.key, object.container, size
                );
                UploadOutcome::Uploaded {
                    key: object.key,
                    url,
                }
            }
            Err(e) => {
                warn!("File upload failed: key={}, error={}", object.key, e);
                UploadOutcome::Failed {
                    message: e.to_string(),
                }
            }
        }
    }

    /// List stored files in the order the store returns them
    ///
    /// A failing store yields an empty listing carrying the error message.
    pub async fn list(&self) -> ListingView {
        let container = self.store.container().to_string();

        match self.store.list().await {
            Ok(objects) => {
                debug!("Listed {} objects in '{}'", objects.len(), container);
                let files = objects
                    .into_iter()
                    .map(|summary| {
                        let object = StoredObject {
                            key: summary.key,
                            container: container.clone(),
                        };
                        ListedFileDto {
                            display_name: object.display_name().to_string(),
                            url: self.urls.object_url(&object.key),
                            size: summary.size,
                            last_modified: summary
                                .last_modified
                                .as_deref()
                                .map(format_last_modified),
                            key: object.key,
                        }
                    })
                    .collect();

                ListingView {
                    container,
                    files,
                    error: None,
                }
            }
            Err(e) => {
                warn!("Listing '{}' failed: {}", container, e);
                ListingView {
                    container,
                    files: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{test_storage_config, RecordingStore};
    use crate::shared::validation::GENERATED_KEY_REGEX;

    fn service(store: Arc<RecordingStore>) -> UploadService {
        UploadService::new(store, &test_storage_config())
    }

    fn pdf(name: &str) -> UploadedFile {
        UploadedFile {
            file_name: name.to_string(),
            content_type: "application/pdf".to_string(),
            data: b"%PDF-1.4".to_vec(),
        }
    }

    #[tokio::test]
    async fn test_upload_without_file_makes_no_store_call() {
        let store = Arc::new(RecordingStore::new());
        let outcome = service(store.clone()).upload(None).await;

        assert_eq!(outcome, UploadOutcome::NoFileSelected);
        assert!(store.puts().is_empty());
    }

    #[tokio::test]
    async fn test_upload_stores_bytes_and_returns_public_url() {
        let store = Arc::new(RecordingStore::new());
        let outcome = service(store.clone()).upload(Some(pdf("report.pdf"))).await;

        let puts = store.puts();
        assert_eq!(puts.len(), 1);
        let put = &puts[0];
        assert!(GENERATED_KEY_REGEX.is_match(&put.key));
        assert!(put.key.ends_with("_report.pdf"));
        assert_eq!(put.data, b"%PDF-1.4");
        assert_eq!(put.content_type, "application/pdf");

        match outcome {
            UploadOutcome::Uploaded { key, url } => {
                assert_eq!(key, put.key);
                assert_eq!(
                    url,
                    format!("https://mybucket.s3.us-east-1.amazonaws.com/{}", put.key)
                );
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_upload_failure_surfaces_message() {
        let store = Arc::new(RecordingStore::failing_put("Access Denied"));
        let outcome = service(store.clone()).upload(Some(pdf("report.pdf"))).await;

        match outcome {
            UploadOutcome::Failed { message } => assert!(message.contains("Access Denied")),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(store.puts().len(), 1);
    }

    #[tokio::test]
    async fn test_same_filename_twice_gets_distinct_keys() {
        let store = Arc::new(RecordingStore::new());
        let service = service(store.clone());
        service.upload(Some(pdf("report.pdf"))).await;
        service.upload(Some(pdf("report.pdf"))).await;

        let puts = store.puts();
        assert_eq!(puts.len(), 2);
        assert_ne!(puts[0].key, puts[1].key);
    }

    #[tokio::test]
    async fn test_list_keeps_store_order() {
        let store = Arc::new(RecordingStore::with_listing(&["b.png", "a.txt"]));
        let view = service(store).list().await;

        assert!(view.error.is_none());
        assert_eq!(view.container, "mybucket");
        let keys: Vec<&str> = view.files.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["b.png", "a.txt"]);
        assert_eq!(
            view.files[0].url,
            "https://mybucket.s3.us-east-1.amazonaws.com/b.png"
        );
        assert_eq!(view.files[1].display_name, "a.txt");
    }

    #[tokio::test]
    async fn test_list_failure_yields_empty_view() {
        let store = Arc::new(RecordingStore::failing_list("network unreachable"));
        let view = service(store).list().await;

        assert!(view.files.is_empty());
        assert!(view.error.unwrap().contains("network unreachable"));
    }
}
