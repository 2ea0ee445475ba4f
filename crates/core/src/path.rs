//! Local path resolution and object key derivation
//!
//! Object keys are derived from a file's path relative to the sync root and
//! always use `/` as separator, whatever the host platform uses.

use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Resolve a user-supplied sync root
///
/// Expands a leading `~` to the home directory, then canonicalizes the
/// result so symlinks in the root itself are followed.
pub fn resolve_root(pathname: &Path) -> Result<PathBuf> {
    let expanded = expand_home(pathname)?;

    match expanded.canonicalize() {
        Ok(root) => Ok(root),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(Error::NotFound(pathname.display().to_string()))
        }
        Err(e) => Err(Error::Io(e)),
    }
}

fn expand_home(pathname: &Path) -> Result<PathBuf> {
    let mut components = pathname.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => {
            let home = dirs::home_dir()
                .ok_or_else(|| Error::Config("Could not determine home directory".into()))?;
            Ok(home.join(components.as_path()))
        }
        _ => Ok(pathname.to_path_buf()),
    }
}

/// Derive the object key for `path` relative to `root`
///
/// Fails if `path` is not below `root` or contains a non UTF-8 component.
pub fn object_key(root: &Path, path: &Path) -> Result<String> {
    let relative = path.strip_prefix(root).map_err(|_| {
        Error::InvalidPath(format!(
            "{} is not inside {}",
            path.display(),
            root.display()
        ))
    })?;

    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                let part = part.to_str().ok_or_else(|| {
                    Error::InvalidPath(format!("{} is not valid UTF-8", path.display()))
                })?;
                parts.push(part);
            }
            Component::CurDir => {}
            _ => {
                return Err(Error::InvalidPath(format!(
                    "{} cannot be mapped to an object key",
                    path.display()
                )));
            }
        }
    }

    if parts.is_empty() {
        return Err(Error::InvalidPath(format!(
            "{} is the sync root itself",
            path.display()
        )));
    }

    Ok(parts.join("/"))
}

/// Basic bucket name validation
///
/// Follows the S3 naming rules: 3 to 63 characters of lowercase letters,
/// digits, hyphens and dots, starting and ending with a letter or digit.
pub fn validate_bucket_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidPath("Bucket name cannot be empty".into()));
    }

    if name.len() < 3 || name.len() > 63 {
        return Err(Error::InvalidPath(
            "Bucket name must be between 3 and 63 characters".into(),
        ));
    }

    let valid_char = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.';
    if !name.chars().all(valid_char) {
        return Err(Error::InvalidPath(format!(
            "Bucket name '{name}' may only contain lowercase letters, digits, '-' and '.'"
        )));
    }

    let alnum = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit();
    if !name.starts_with(alnum) || !name.ends_with(alnum) {
        return Err(Error::InvalidPath(format!(
            "Bucket name '{name}' must start and end with a letter or digit"
        )));
    }

    Ok(())
}
