//! Storage module for uploaded objects
//!
//! Provides the `ObjectStore` seam used by the upload feature, its S3
//! implementation, and the public URL rule for stored keys.

mod object_store;
mod public_url;
mod s3_client;

pub use object_store::{ObjectStore, ObjectSummary, StorageError, StorageResult};
pub use public_url::PublicUrlBuilder;
pub use s3_client::S3Client;
