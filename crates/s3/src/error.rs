//! Mapping of SDK failures onto webotron-core errors
//!
//! Classification uses the structured error code the service returns,
//! never the rendered message.

use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_smithy_types::DateTime;
use webotron_core::Error;

/// Convert a failed SDK call into an `Error`, prefixing `context`
pub(crate) fn map_sdk_error<E, R>(err: SdkError<E, R>, context: &str) -> Error
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let detail = format!("{context}: {}", DisplayErrorContext(&err));

    match &err {
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) => Error::Network(detail),
        _ => error_for_code(err.code(), detail),
    }
}

/// Pick the error variant for an S3 error code
pub(crate) fn error_for_code(code: Option<&str>, detail: String) -> Error {
    match code {
        Some(
            "AccessDenied"
            | "AllAccessDisabled"
            | "InvalidAccessKeyId"
            | "SignatureDoesNotMatch"
            | "ExpiredToken"
            | "InvalidToken",
        ) => Error::Auth(detail),
        Some("NoSuchBucket" | "NoSuchKey" | "NotFound") => Error::NotFound(detail),
        Some("BucketAlreadyExists" | "OperationAborted") => Error::Conflict(detail),
        Some("RequestTimeout" | "SlowDown" | "ServiceUnavailable" | "InternalError") => {
            Error::Network(detail)
        }
        _ => Error::General(detail),
    }
}

/// Convert an SDK timestamp, dropping values jiff cannot represent
pub(crate) fn to_timestamp(value: &DateTime) -> Option<jiff::Timestamp> {
    jiff::Timestamp::from_second(value.secs()).ok()
}
