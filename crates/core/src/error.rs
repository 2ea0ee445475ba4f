//! Error types for webotron-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.

use thiserror::Error;

/// Result type alias for webotron-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for webotron-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Local path cannot be used (not UTF-8, outside the sync root, ...)
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Authentication or authorization failure reported by the service
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Resource not found (local path, bucket)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Transport-level failure
    #[error("Network error: {0}")]
    Network(String),

    /// Bucket name is taken by another account
    #[error("Conflict: {0}")]
    Conflict(String),

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidPath(_) | Error::Config(_) | Error::InvalidUrl(_) => 2, // UsageError
            Error::TomlParse(_) => 2,                                             // UsageError
            Error::Network(_) => 3,                                               // NetworkError
            Error::Auth(_) => 4,                                                  // AuthError
            Error::NotFound(_) => 5,                                              // NotFound
            Error::Conflict(_) => 6,                                              // Conflict
            _ => 1,                                                               // GeneralError
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(Error::InvalidPath("test".into()).exit_code(), 2);
        assert_eq!(Error::Config("test".into()).exit_code(), 2);
        assert_eq!(Error::Network("test".into()).exit_code(), 3);
        assert_eq!(Error::Auth("test".into()).exit_code(), 4);
        assert_eq!(Error::NotFound("test".into()).exit_code(), 5);
        assert_eq!(Error::Conflict("test".into()).exit_code(), 6);
        assert_eq!(Error::General("test".into()).exit_code(), 1);
        assert_eq!(
            Error::Io(std::io::Error::other("disk on fire")).exit_code(),
            1
        );
    }

    #[test]
    fn test_error_display() {
        let err = Error::NotFound("./site".into());
        assert_eq!(err.to_string(), "Not found: ./site");

        let err = Error::Conflict("bucket 'my-site' is owned by another account".into());
        assert_eq!(
            err.to_string(),
            "Conflict: bucket 'my-site' is owned by another account"
        );
    }
}
