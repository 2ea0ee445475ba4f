//! list-bucket-objects command
//!
//! Prints the key of every object in a bucket.

use clap::Args;
use futures::StreamExt;
use serde::Serialize;
use webotron_core::{ObjectInfo, Session, all_objects};

use super::connect;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// List all objects in a bucket
#[derive(Args, Debug)]
pub struct ListBucketObjectsArgs {
    /// Bucket to list
    pub bucket: String,
}

#[derive(Debug, Serialize)]
struct ListObjectsOutput {
    bucket: String,
    objects: Vec<ObjectInfo>,
}

/// Execute the list-bucket-objects command
pub async fn execute(
    args: ListBucketObjectsArgs,
    session: &Session,
    output_config: OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let client = match connect(session, &formatter).await {
        Ok(client) => client,
        Err(code) => return code,
    };

    let mut objects = all_objects(&client, &args.bucket);
    let mut listed = Vec::new();

    while let Some(object) = objects.next().await {
        match object {
            Ok(object) if formatter.is_json() => listed.push(object),
            Ok(object) => formatter.line(&object.key),
            Err(e) => {
                formatter.error(&format!(
                    "Failed to list objects in '{}': {e}",
                    args.bucket
                ));
                return ExitCode::from(&e);
            }
        }
    }

    drop(objects);

    if formatter.is_json() {
        formatter.json(&ListObjectsOutput {
            bucket: args.bucket,
            objects: listed,
        });
    }

    ExitCode::Success
}
