//! Exit code definitions for the webotron CLI
//!
//! Scripts deploying with webotron can branch on these values, so existing
//! codes must keep their meaning.

use webotron_core::Error;

/// Exit codes for the webotron CLI application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Operation completed successfully
    Success = 0,

    /// General/unspecified error
    GeneralError = 1,

    /// User input error: invalid arguments, bad bucket name, bad config
    UsageError = 2,

    /// Network error: timeout, connection reset, throttling
    NetworkError = 3,

    /// Authentication or permission failure
    AuthError = 4,

    /// Resource not found: local path or bucket does not exist
    NotFound = 5,

    /// Bucket name is owned by another account
    Conflict = 6,
}

impl ExitCode {
    /// Value passed to `std::process::exit`
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Whether the command should count as a failure in scripts
    pub const fn is_failure(self) -> bool {
        !matches!(self, Self::Success)
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err.exit_code() {
            2 => Self::UsageError,
            3 => Self::NetworkError,
            4 => Self::AuthError,
            5 => Self::NotFound,
            6 => Self::Conflict,
            _ => Self::GeneralError,
        }
    }
}
