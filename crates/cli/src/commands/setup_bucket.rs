//! setup-bucket command
//!
//! Creates a bucket (or reuses one the caller already owns), makes its
//! objects publicly readable and enables static website hosting.

use clap::Args;
use serde::Serialize;
use webotron_core::{Config, ObjectStore as _, Session, validate_bucket_name};

use super::connect;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Create a bucket and configure it for website hosting
#[derive(Args, Debug)]
pub struct SetupBucketArgs {
    /// Bucket name
    pub bucket: String,

    /// Index document suffix (overrides config, default index.html)
    #[arg(long)]
    pub index_document: Option<String>,

    /// Error document key (overrides config, default error.html)
    #[arg(long)]
    pub error_document: Option<String>,
}

#[derive(Debug, Serialize)]
struct SetupBucketOutput {
    status: &'static str,
    bucket: String,
    region: String,
    index_document: String,
    error_document: String,
}

/// Execute the setup-bucket command
pub async fn execute(
    args: SetupBucketArgs,
    config: &Config,
    session: &Session,
    output_config: OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output_config);

    if let Err(e) = validate_bucket_name(&args.bucket) {
        formatter.error(&e.to_string());
        return ExitCode::UsageError;
    }

    let website = config
        .website
        .clone()
        .with_overrides(args.index_document, args.error_document);
    if let Err(e) = website.validate() {
        formatter.error(&e.to_string());
        return ExitCode::UsageError;
    }

    let client = match connect(session, &formatter).await {
        Ok(client) => client,
        Err(code) => return code,
    };

    let Some(region) = client.region().map(str::to_string) else {
        formatter.error("No region configured. Use --region or set one in your AWS profile.");
        return ExitCode::UsageError;
    };

    let bucket = match client.create_or_get_bucket(&args.bucket, &region).await {
        Ok(bucket) => bucket,
        Err(e) => {
            formatter.error(&format!("Failed to create bucket '{}': {e}", args.bucket));
            return ExitCode::from(&e);
        }
    };
    let name = formatter.bucket_name(&bucket.name);
    formatter.step(&format!("Bucket {name} ready in {region}"));

    if let Err(e) = client.set_public_read_policy(&bucket).await {
        formatter.error(&format!("Failed to set policy on '{bucket}': {e}"));
        return ExitCode::from(&e);
    }
    formatter.step(&format!("Public read policy applied to {name}"));

    if let Err(e) = client.enable_website_hosting(&bucket, &website).await {
        formatter.error(&format!("Failed to enable website hosting on '{bucket}': {e}"));
        return ExitCode::from(&e);
    }
    formatter.step(&format!(
        "Website hosting enabled on {name} (index: {}, error: {})",
        website.index_document, website.error_document
    ));

    if formatter.is_json() {
        formatter.json(&SetupBucketOutput {
            status: "success",
            bucket: bucket.name,
            region,
            index_document: website.index_document,
            error_document: website.error_document,
        });
    }

    ExitCode::Success
}
