//! list-buckets command
//!
//! Prints every bucket visible to the configured credentials.

use clap::Args;
use futures::StreamExt;
use serde::Serialize;
use webotron_core::{Bucket, Session, all_buckets};

use super::connect;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// List all buckets
#[derive(Args, Debug)]
pub struct ListBucketsArgs {}

#[derive(Debug, Serialize)]
struct ListBucketsOutput {
    buckets: Vec<Bucket>,
}

/// Execute the list-buckets command
pub async fn execute(
    _args: ListBucketsArgs,
    session: &Session,
    output_config: OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let client = match connect(session, &formatter).await {
        Ok(client) => client,
        Err(code) => return code,
    };

    let mut buckets = all_buckets(&client);
    let mut listed = Vec::new();

    while let Some(bucket) = buckets.next().await {
        match bucket {
            Ok(bucket) if formatter.is_json() => listed.push(bucket),
            Ok(bucket) => formatter.line(&bucket.name),
            Err(e) => {
                formatter.error(&format!("Failed to list buckets: {e}"));
                return ExitCode::from(&e);
            }
        }
    }

    if formatter.is_json() {
        formatter.json(&ListBucketsOutput { buckets: listed });
    }

    ExitCode::Success
}
