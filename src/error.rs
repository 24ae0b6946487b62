use std::error::Error as StdError;

use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_smithy_runtime_api::client::orchestrator::HttpResponse;

/// Library result type.
pub type Result<T> = std::result::Result<T, Error>;

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Error type for configuration, validation, and calls to the storage service.
///
/// Sentinel conditions (`NoBucketName`, `BucketNotFound`, `BucketNotEmpty`,
/// `SnapshotRequired`) have `is_*` predicates that also match when the
/// condition is nested inside an aggregated [`Error::Construction`].
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No default bucket was configured for a single-bucket client.
    #[error(
        "bucket name not set: provide the TIGRIS_STORAGE_BUCKET environment variable or set a bucket on the builder"
    )]
    NoBucketName,

    /// The bucket does not exist.
    #[error("bucket not found: {bucket}")]
    BucketNotFound { bucket: String },

    /// The bucket still holds objects.
    #[error("bucket not empty: {bucket}")]
    BucketNotEmpty { bucket: String },

    /// A snapshot version was required but not provided.
    #[error("snapshot version required for this operation")]
    SnapshotRequired,

    /// Client construction failed; every problem found is listed.
    #[error("can't create client: {}", join_errors(.errors))]
    Construction { errors: Vec<Error> },

    /// Invalid configuration value.
    #[error("invalid config: {message}")]
    InvalidConfig { message: String },

    /// Invalid call argument, detected before any request was built.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// The storage service (or the SDK talking to it) returned an error.
    #[error("can't {operation} {target}: {}", DisplayErrorContext(.source.as_ref()))]
    Service {
        operation: &'static str,
        target: String,
        status: Option<u16>,
        code: Option<String>,
        #[source]
        source: BoxError,
    },

    /// The SDK response did not have the shape this crate depends on.
    #[error("unexpected response: {message}")]
    UnexpectedResponse { message: String },

    /// Reading an object body failed.
    #[error("failed to read object body: {source}")]
    Body {
        #[source]
        source: BoxError,
    },
}

fn join_errors(errors: &[Error]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl Error {
    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Creates an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates an unexpected response error.
    pub fn unexpected_response(message: impl Into<String>) -> Self {
        Self::UnexpectedResponse {
            message: message.into(),
        }
    }

    pub(crate) fn body(source: impl Into<BoxError>) -> Self {
        Self::Body {
            source: source.into(),
        }
    }

    /// Wraps an SDK error with the logical operation and its `bucket[/key]` target.
    ///
    /// `NoSuchBucket` and `BucketNotEmpty` service codes become their sentinels.
    pub(crate) fn service<E>(
        operation: &'static str,
        target: impl Into<String>,
        err: SdkError<E, HttpResponse>,
    ) -> Self
    where
        E: ProvideErrorMetadata + StdError + Send + Sync + 'static,
    {
        let target = target.into();
        let status = err.raw_response().map(|resp| resp.status().as_u16());
        let code = err.code().map(ToString::to_string);

        match code.as_deref() {
            Some("NoSuchBucket") => Self::BucketNotFound {
                bucket: bucket_of(&target),
            },
            Some("BucketNotEmpty") => Self::BucketNotEmpty {
                bucket: bucket_of(&target),
            },
            _ => Self::Service {
                operation,
                target,
                status,
                code,
                source: Box::new(err),
            },
        }
    }

    /// Returns true for the "no bucket name configured" sentinel.
    pub fn is_no_bucket_name(&self) -> bool {
        self.any(|e| matches!(e, Self::NoBucketName))
    }

    /// Returns true for the "bucket not found" sentinel.
    pub fn is_bucket_not_found(&self) -> bool {
        self.any(|e| matches!(e, Self::BucketNotFound { .. }))
    }

    /// Returns true for the "bucket not empty" sentinel.
    pub fn is_bucket_not_empty(&self) -> bool {
        self.any(|e| matches!(e, Self::BucketNotEmpty { .. }))
    }

    /// Returns true for the "snapshot version required" sentinel.
    pub fn is_snapshot_required(&self) -> bool {
        self.any(|e| matches!(e, Self::SnapshotRequired))
    }

    /// Returns the HTTP status reported by the service, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Service { status, .. } => *status,
            _ => None,
        }
    }

    /// Returns the service error code, if any.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Service { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// Returns true if the service rejected the call as not implemented.
    pub fn is_unsupported(&self) -> bool {
        self.status() == Some(501)
            || matches!(self.code(), Some("NotImplemented" | "UnsupportedOperation"))
    }

    fn any(&self, predicate: impl Fn(&Self) -> bool + Copy) -> bool {
        match self {
            Self::Construction { errors } => errors.iter().any(|e| e.any(predicate)),
            other => predicate(other),
        }
    }
}

fn bucket_of(target: &str) -> String {
    target.split('/').next().unwrap_or(target).to_string()
}
