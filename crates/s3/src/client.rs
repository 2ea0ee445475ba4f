//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the ObjectStore trait from webotron-core.

use std::path::Path;

use async_trait::async_trait;
use aws_sdk_s3::operation::create_bucket::CreateBucketError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{
    BucketLocationConstraint, CreateBucketConfiguration, ErrorDocument, IndexDocument,
    WebsiteConfiguration,
};
use tracing::{debug, info};

use webotron_core::{
    Bucket, BucketPage, Error, ListResult, ObjectInfo, ObjectStore, Result, Session,
    WebsiteConfig, guess_content_type, public_read_policy,
};

use crate::error::{map_sdk_error, to_timestamp};

/// Region in which S3 rejects an explicit location constraint
const DEFAULT_REGION: &str = "us-east-1";

/// S3 client wrapper
pub struct S3Client {
    inner: aws_sdk_s3::Client,
    region: Option<String>,
}

impl S3Client {
    /// Create a new S3 client from session settings
    ///
    /// Unset fields fall back to the SDK's default provider chains
    /// (environment, shared config files, instance metadata).
    pub async fn new(session: &Session) -> Result<Self> {
        session.validate()?;

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

        if let Some(profile) = &session.profile {
            loader = loader.profile_name(profile);
        }

        if let Some(region) = &session.region {
            loader = loader.region(aws_config::Region::new(region.clone()));
        }

        if let Some(endpoint) = &session.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        let config = loader.load().await;
        let region = config.region().map(|r| r.to_string());

        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(session.uses_path_style())
            .build();

        debug!(
            profile = session.profile.as_deref().unwrap_or("default"),
            region = region.as_deref().unwrap_or("unset"),
            endpoint = session.endpoint.as_deref().unwrap_or("aws"),
            "S3 client configured"
        );

        Ok(Self::from_conf(s3_config, region))
    }

    fn from_conf(config: aws_sdk_s3::Config, region: Option<String>) -> Self {
        Self {
            inner: aws_sdk_s3::Client::from_conf(config),
            region,
        }
    }

    /// Region resolved from the session or the SDK provider chain
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }
}

/// Build the CreateBucket location constraint for `region`
fn location_constraint(region: &str) -> Option<CreateBucketConfiguration> {
    if region.is_empty() || region == DEFAULT_REGION {
        return None;
    }

    Some(
        CreateBucketConfiguration::builder()
            .location_constraint(BucketLocationConstraint::from(region))
            .build(),
    )
}

/// How a CreateBucket call collided with an existing bucket
#[derive(Debug, PartialEq, Eq)]
enum ExistingBucket {
    OwnedByCaller,
    OwnedByOther,
}

fn existing_bucket(err: &CreateBucketError) -> Option<ExistingBucket> {
    if err.is_bucket_already_owned_by_you() {
        Some(ExistingBucket::OwnedByCaller)
    } else if err.is_bucket_already_exists() {
        Some(ExistingBucket::OwnedByOther)
    } else {
        None
    }
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn list_buckets(&self, continuation_token: Option<String>) -> Result<BucketPage> {
        let response = self
            .inner
            .list_buckets()
            .set_continuation_token(continuation_token)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, "Failed to list buckets"))?;

        let buckets = response
            .buckets()
            .iter()
            .map(|b| Bucket {
                name: b.name().unwrap_or_default().to_string(),
                region: b.bucket_region().map(str::to_string),
                created: b.creation_date().and_then(to_timestamp),
            })
            .collect();

        Ok(BucketPage {
            buckets,
            continuation_token: response.continuation_token().map(str::to_string),
        })
    }

    async fn list_objects(
        &self,
        bucket: &str,
        continuation_token: Option<String>,
    ) -> Result<ListResult> {
        let response = self
            .inner
            .list_objects_v2()
            .bucket(bucket)
            .set_continuation_token(continuation_token)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, &format!("Failed to list objects in '{bucket}'")))?;

        let items = response
            .contents()
            .iter()
            .map(|object| {
                let mut info = ObjectInfo::file(
                    object.key().unwrap_or_default(),
                    object.size().unwrap_or(0),
                );
                info.last_modified = object.last_modified().and_then(to_timestamp);
                info.etag = object.e_tag().map(|etag| etag.trim_matches('"').to_string());
                info.storage_class = object.storage_class().map(|sc| sc.as_str().to_string());
                info
            })
            .collect();

        Ok(ListResult {
            items,
            truncated: response.is_truncated().unwrap_or(false),
            continuation_token: response.next_continuation_token().map(str::to_string),
        })
    }

    async fn create_or_get_bucket(&self, name: &str, region: &str) -> Result<Bucket> {
        let request = self
            .inner
            .create_bucket()
            .bucket(name)
            .set_create_bucket_configuration(location_constraint(region));

        match request.send().await {
            Ok(_) => {
                info!(bucket = name, region, "Created bucket");
                Ok(Bucket::new(name).in_region(region))
            }
            Err(e) => {
                let existing = e.as_service_error().and_then(existing_bucket);
                match existing {
                    Some(ExistingBucket::OwnedByCaller) => {
                        info!(bucket = name, "Bucket already owned by caller, reusing it");
                        Ok(Bucket::new(name).in_region(region))
                    }
                    Some(ExistingBucket::OwnedByOther) => Err(Error::Conflict(format!(
                        "Bucket '{name}' already exists and is owned by another account"
                    ))),
                    None => Err(map_sdk_error(e, &format!("Failed to create bucket '{name}'"))),
                }
            }
        }
    }

    async fn set_public_read_policy(&self, bucket: &Bucket) -> Result<()> {
        let policy = public_read_policy(&bucket.name)?;
        debug!(bucket = %bucket, %policy, "Applying bucket policy");

        self.inner
            .put_bucket_policy()
            .bucket(&bucket.name)
            .policy(policy)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, &format!("Failed to set policy on '{bucket}'")))?;

        info!(bucket = %bucket, "Applied public-read policy");
        Ok(())
    }

    async fn enable_website_hosting(
        &self,
        bucket: &Bucket,
        website: &WebsiteConfig,
    ) -> Result<()> {
        website.validate()?;

        let index = IndexDocument::builder()
            .suffix(&website.index_document)
            .build()
            .map_err(|e| Error::General(e.to_string()))?;
        let error = ErrorDocument::builder()
            .key(&website.error_document)
            .build()
            .map_err(|e| Error::General(e.to_string()))?;
        let configuration = WebsiteConfiguration::builder()
            .index_document(index)
            .error_document(error)
            .build();

        self.inner
            .put_bucket_website()
            .bucket(&bucket.name)
            .website_configuration(configuration)
            .send()
            .await
            .map_err(|e| {
                map_sdk_error(e, &format!("Failed to configure website on '{bucket}'"))
            })?;

        info!(
            bucket = %bucket,
            index = %website.index_document,
            error = %website.error_document,
            "Enabled website hosting"
        );
        Ok(())
    }

    async fn upload_object(
        &self,
        bucket: &Bucket,
        local_path: &Path,
        key: &str,
    ) -> Result<ObjectInfo> {
        let content_type = guess_content_type(key);
        let size = tokio::fs::metadata(local_path).await?.len() as i64;
        let body = ByteStream::from_path(local_path).await.map_err(|e| {
            Error::General(format!("Failed to read {}: {e}", local_path.display()))
        })?;

        let response = self
            .inner
            .put_object()
            .bucket(&bucket.name)
            .key(key)
            .content_type(&content_type)
            .body(body)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, &format!("Failed to upload {key}")))?;

        info!(bucket = %bucket, key, content_type = %content_type, size, "Uploaded object");

        let mut info = ObjectInfo::file(key, size);
        info.etag = response.e_tag().map(|etag| etag.trim_matches('"').to_string());
        info.content_type = Some(content_type);
        info.last_modified = Some(jiff::Timestamp::now());

        Ok(info)
    }
}
