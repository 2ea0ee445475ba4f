//! Directory-to-bucket synchronization
//!
//! Mirrors a local directory tree into a bucket with one upload per regular
//! file. The walk is depth-first in directory-listing order: when an entry is
//! a directory, its whole subtree is uploaded before the next sibling.
//! Anything that is neither a regular file nor a directory (symlinks,
//! sockets, devices) is skipped. The first failure aborts the walk.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::path::{object_key, resolve_root};
use crate::traits::{Bucket, ObjectInfo, ObjectStore};

/// A file that was uploaded during a sync
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Absolute local path
    pub local_path: PathBuf,
    /// Object key it was stored under
    pub key: String,
    /// What the store reported for the new object
    pub info: ObjectInfo,
}

/// Totals for a completed sync
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncSummary {
    /// Resolved sync root
    pub root: PathBuf,
    /// Target bucket name
    pub bucket: String,
    /// Number of files uploaded
    pub files: usize,
    /// Total bytes uploaded
    pub bytes: u64,
}

/// Upload every regular file under `pathname` into `bucket`
///
/// Keys are the files' paths relative to the resolved root, joined with `/`.
/// `on_upload` is called after each successful upload.
pub async fn sync_directory<F>(
    store: &dyn ObjectStore,
    pathname: &Path,
    bucket: &Bucket,
    mut on_upload: F,
) -> Result<SyncSummary>
where
    F: FnMut(&UploadedFile),
{
    let root = resolve_root(pathname)?;
    if !root.is_dir() {
        return Err(Error::InvalidPath(format!(
            "{} is not a directory",
            root.display()
        )));
    }

    info!(root = %root.display(), bucket = %bucket, "Starting sync");

    let mut summary = SyncSummary {
        root: root.clone(),
        bucket: bucket.name.clone(),
        ..Default::default()
    };

    let mut stack = vec![fs::read_dir(&root)?];
    while let Some(entries) = stack.last_mut() {
        let Some(entry) = entries.next() else {
            stack.pop();
            continue;
        };
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            debug!(path = %path.display(), "Entering directory");
            stack.push(fs::read_dir(&path)?);
        } else if file_type.is_file() {
            let key = object_key(&root, &path)?;
            debug!(path = %path.display(), key = %key, "Uploading");

            let info = store.upload_object(bucket, &path, &key).await?;
            summary.files += 1;
            summary.bytes += info.size_bytes.unwrap_or(0).max(0) as u64;

            let uploaded = UploadedFile {
                local_path: path,
                key,
                info,
            };
            on_upload(&uploaded);
        } else {
            warn!(path = %path.display(), "Skipping non-regular entry");
        }
    }

    info!(
        files = summary.files,
        bytes = summary.bytes,
        bucket = %bucket,
        "Sync complete"
    );

    Ok(summary)
}
