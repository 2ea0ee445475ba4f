//! webotron-core: Core library for the webotron static site deployer
//!
//! This crate provides the core functionality for webotron, including:
//! - Configuration and session management
//! - Object key derivation and content-type inference
//! - Bucket policy and website hosting documents
//! - The ObjectStore trait for storage operations
//! - Directory-to-bucket synchronization
//!
//! This crate is designed to be independent of any specific S3 SDK,
//! allowing the sync walker to be tested against mocks.

pub mod config;
pub mod content_type;
pub mod error;
pub mod listing;
pub mod path;
pub mod policy;
pub mod session;
pub mod sync;
pub mod traits;
pub mod website;

pub use config::{Config, ConfigManager};
pub use content_type::guess_content_type;
pub use error::{Error, Result};
pub use listing::{all_buckets, all_objects};
pub use path::{object_key, resolve_root, validate_bucket_name};
pub use policy::public_read_policy;
pub use session::Session;
pub use sync::{sync_directory, SyncSummary, UploadedFile};
pub use traits::{Bucket, BucketPage, ListResult, ObjectInfo, ObjectStore};
pub use website::WebsiteConfig;
