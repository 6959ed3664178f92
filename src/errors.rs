//! Error types for dynobatch.
//!
//! AWS SDK errors are mapped with typed `SdkError` variant matching. Service
//! errors keep the code and message the service sent.

use aws_sdk_dynamodb::error::{ProvideErrorMetadata, SdkError};
use thiserror::Error;

/// Error code DynamoDB returns when a table already exists.
pub const RESOURCE_IN_USE: &str = "ResourceInUseException";

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// An error reported by the service, unchanged.
    #[error("{code}: {message}")]
    Service { code: String, message: String },

    #[error("connection error: {0}")]
    Connection(String),

    #[error("credentials error: {0}")]
    Credentials(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("failed to build request: {0}")]
    Build(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid table definition: {0}")]
    InvalidTableDefinition(String),

    #[error("{operation}: {remaining} items still unprocessed after {retries} retries")]
    UnprocessedRetriesExhausted {
        operation: &'static str,
        remaining: usize,
        retries: u32,
    },

    #[error("runtime error: {0}")]
    Runtime(String),
}

impl Error {
    pub fn service(code: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Service {
            code: code.into(),
            message: message.into(),
        }
    }

    /// The service error code, if this is a service error.
    pub fn code(&self) -> Option<&str> {
        match self {
            Error::Service { code, .. } => Some(code),
            _ => None,
        }
    }

    /// The service error message, if this is a service error.
    pub fn message(&self) -> Option<&str> {
        match self {
            Error::Service { message, .. } => Some(message),
            _ => None,
        }
    }

    /// True when the table being created already exists.
    pub fn is_already_exists(&self) -> bool {
        self.code() == Some(RESOURCE_IN_USE)
    }
}

/// Map non-service `SdkError` variants (dispatch failures, timeouts, etc.).
///
/// Returns `None` for `ServiceError`.
fn map_outer_sdk_error<E, R>(err: &SdkError<E, R>) -> Option<Error>
where
    E: std::fmt::Debug,
    R: std::fmt::Debug,
{
    match err {
        SdkError::DispatchFailure(dispatch) => {
            if dispatch.is_timeout() {
                Some(Error::Connection(
                    "connection timed out to DynamoDB".to_string(),
                ))
            } else if dispatch.is_io() {
                Some(Error::Connection(
                    "connection failed to DynamoDB (I/O error)".to_string(),
                ))
            } else {
                Some(Error::Connection(format!(
                    "connection failed to DynamoDB: {:?}",
                    dispatch
                )))
            }
        }
        SdkError::TimeoutError(_) => Some(Error::Connection(
            "connection timed out to DynamoDB".to_string(),
        )),
        SdkError::ConstructionFailure(err) => {
            let msg = format!("{:?}", err);
            if msg.contains("credentials")
                || msg.contains("Credentials")
                || msg.contains("NoCredentialsError")
            {
                Some(Error::Credentials(
                    "no AWS credentials found; set AWS_ACCESS_KEY_ID/AWS_SECRET_ACCESS_KEY, \
                     a profile, or an IAM role"
                        .to_string(),
                ))
            } else {
                Some(Error::Request(format!("failed to build request: {}", msg)))
            }
        }
        SdkError::ResponseError(err) => Some(Error::Request(format!(
            "invalid response from DynamoDB: {:?}",
            err
        ))),
        SdkError::ServiceError(_) => None,
        _ => Some(Error::Request(format!(
            "unknown error from DynamoDB: {:?}",
            err
        ))),
    }
}

/// Map a DynamoDB `SdkError` into [`Error`].
///
/// Service errors keep their code and message. Everything else is
/// classified by `SdkError` variant.
pub fn map_sdk_error<E, R>(err: SdkError<E, R>) -> Error
where
    E: ProvideErrorMetadata + std::fmt::Debug + std::fmt::Display,
    R: std::fmt::Debug,
{
    if let Some(mapped) = map_outer_sdk_error(&err) {
        return mapped;
    }

    if let Some(service_err) = err.as_service_error() {
        let meta = ProvideErrorMetadata::meta(service_err);
        let code = meta.code().unwrap_or("Unknown");
        let message = meta
            .message()
            .map(str::to_string)
            .unwrap_or_else(|| service_err.to_string());
        return Error::service(code, message);
    }

    Error::Request(format!("unexpected DynamoDB error: {:?}", err))
}
