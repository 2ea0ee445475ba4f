//! sync command - Upload a local site to a bucket
//!
//! Every regular file under the local directory is uploaded with its
//! relative path as the key. Nothing is diffed: each run re-uploads
//! everything, and the first failed upload stops the run.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use webotron_core::{Bucket, Error, Session, resolve_root, sync_directory};

use super::connect;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, ProgressBar};

/// Upload the contents of a local directory to a bucket
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Local directory to upload
    pub pathname: PathBuf,

    /// Target bucket
    pub bucket: String,
}

#[derive(Debug, Serialize)]
struct SyncedFile {
    source: String,
    key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    size_bytes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_type: Option<String>,
}

#[derive(Debug, Serialize)]
struct SyncOutput {
    status: &'static str,
    bucket: String,
    root: String,
    files: usize,
    bytes: u64,
    uploaded: Vec<SyncedFile>,
}

/// Execute the sync command
pub async fn execute(args: SyncArgs, session: &Session, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config.clone());

    // The local path is checked before any client is built
    let root = match resolve_root(&args.pathname) {
        Ok(root) => root,
        Err(Error::NotFound(_)) => {
            formatter.error(&format!(
                "Path '{}' does not exist",
                args.pathname.display()
            ));
            return ExitCode::NotFound;
        }
        Err(e) => {
            formatter.error(&format!("Cannot use '{}': {e}", args.pathname.display()));
            return ExitCode::from(&e);
        }
    };

    let client = match connect(session, &formatter).await {
        Ok(client) => client,
        Err(code) => return code,
    };

    let bucket = Bucket::new(&args.bucket);
    let spinner = ProgressBar::spinner(&output_config, &format!("Syncing to s3://{bucket}"));
    let mut uploaded = Vec::new();

    let result = sync_directory(&client, &root, &bucket, |file| {
        spinner.inc(1);
        spinner.set_message(&file.key);

        if formatter.is_json() {
            uploaded.push(SyncedFile {
                source: file.local_path.display().to_string(),
                key: file.key.clone(),
                size_bytes: file.info.size_bytes,
                content_type: file.info.content_type.clone(),
            });
        } else if !formatter.is_quiet() {
            spinner.println(&formatter.upload_line(file, &bucket));
        }
    })
    .await;
    spinner.finish_and_clear();

    match result {
        Ok(summary) => {
            if formatter.is_json() {
                formatter.json(&SyncOutput {
                    status: "success",
                    bucket: summary.bucket,
                    root: summary.root.display().to_string(),
                    files: summary.files,
                    bytes: summary.bytes,
                    uploaded,
                });
            } else {
                formatter.step(&format!(
                    "Uploaded {} file(s) ({}) to s3://{bucket}",
                    summary.files,
                    humansize::format_size(summary.bytes, humansize::BINARY)
                ));
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("Sync to s3://{bucket} failed: {e}"));
            ExitCode::from(&e)
        }
    }
}
