//! ObjectStore trait definition
//!
//! This trait is the storage gateway contract: every operation the deployer
//! performs against the remote object store goes through it. It keeps the
//! sync walker and the CLI decoupled from the SDK implementation.

use std::path::Path;

use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::website::WebsiteConfig;

/// Handle to a remote bucket
///
/// The remote service owns the bucket; this only carries its name and
/// whatever metadata the service reported alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    /// Bucket name
    pub name: String,

    /// Region the bucket was created in, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Creation timestamp as reported by ListBuckets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<Timestamp>,
}

impl Bucket {
    /// Create a handle to a bucket by name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            region: None,
            created: None,
        }
    }

    /// Attach the region the bucket lives in
    pub fn in_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Metadata for an object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectInfo {
    /// Object key
    pub key: String,

    /// Size in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<i64>,

    /// Human-readable size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_human: Option<String>,

    /// Last modified timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<Timestamp>,

    /// ETag (usually MD5 for single-part uploads)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,

    /// Storage class
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,

    /// Content type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl ObjectInfo {
    /// Create a new ObjectInfo for an object of known size
    pub fn file(key: impl Into<String>, size: i64) -> Self {
        Self {
            key: key.into(),
            size_bytes: Some(size),
            size_human: Some(humansize::format_size(size.max(0) as u64, humansize::BINARY)),
            last_modified: None,
            etag: None,
            storage_class: None,
            content_type: None,
        }
    }
}

/// One page of an object listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListResult {
    /// Listed objects
    pub items: Vec<ObjectInfo>,

    /// Whether the result is truncated (more items available)
    pub truncated: bool,

    /// Continuation token for pagination
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continuation_token: Option<String>,
}

/// One page of a bucket listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BucketPage {
    /// Listed buckets
    pub buckets: Vec<Bucket>,

    /// Continuation token for the next page, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continuation_token: Option<String>,
}

/// Trait for the remote object-storage operations used by webotron
///
/// This trait is implemented by the S3 adapter and can be mocked for testing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List one page of the buckets visible to the caller's credentials
    async fn list_buckets(&self, continuation_token: Option<String>) -> Result<BucketPage>;

    /// List one page of the objects in a bucket
    async fn list_objects(
        &self,
        bucket: &str,
        continuation_token: Option<String>,
    ) -> Result<ListResult>;

    /// Create a bucket in `region`, or return the existing one if the
    /// caller already owns it
    ///
    /// A bucket owned by another account is an `Error::Conflict`.
    async fn create_or_get_bucket(&self, name: &str, region: &str) -> Result<Bucket>;

    /// Attach a policy granting anonymous `s3:GetObject` on every object
    async fn set_public_read_policy(&self, bucket: &Bucket) -> Result<()>;

    /// Enable static website hosting with the given index and error documents
    async fn enable_website_hosting(&self, bucket: &Bucket, website: &WebsiteConfig)
    -> Result<()>;

    /// Upload the file at `local_path` as `key`, overwriting any existing object
    ///
    /// The content type is guessed from the key.
    async fn upload_object(
        &self,
        bucket: &Bucket,
        local_path: &Path,
        key: &str,
    ) -> Result<ObjectInfo>;
}
