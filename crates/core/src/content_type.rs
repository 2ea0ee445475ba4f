//! Content-type inference for uploaded objects

/// Content type used when the key has no recognised extension
pub const DEFAULT_CONTENT_TYPE: &str = "text/html";

/// Guess the MIME type of an object from its key
pub fn guess_content_type(key: &str) -> String {
    mime_guess::from_path(key)
        .first()
        .map(|m| m.essence_str().to_string())
        .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string())
}
