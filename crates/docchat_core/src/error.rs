use std::fmt;

use thiserror::Error;

/// Why a backend request did not produce a usable response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// Connection refused, reset, DNS failure and similar.
    Network,
    Timeout,
    HttpStatus(u16),
    /// Body was not JSON or lacked the expected field.
    ResponseFormat,
    /// Backend answered with an explicit `error` message.
    Rejected,
    /// A selected file could not be read.
    LocalFile,
    /// The request could not be built, e.g. a bad backend URL.
    InvalidRequest,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::ResponseFormat => write!(f, "unexpected response format"),
            FailureKind::Rejected => write!(f, "rejected by backend"),
            FailureKind::LocalFile => write!(f, "unreadable file"),
            FailureKind::InvalidRequest => write!(f, "invalid request"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct RequestFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl RequestFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Select a file first!")]
    EmptySelection,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("upload failed: {failure}")]
pub struct UploadError {
    #[source]
    pub failure: RequestFailure,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("query failed: {failure}")]
pub struct QueryError {
    #[source]
    pub failure: RequestFailure,
}

/// Everything a controller can hand back to the front end as a failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error(transparent)]
    Query(#[from] QueryError),
}

impl ControllerError {
    /// Validation failures come from the user's own input and never reached
    /// the backend; front ends pair them with a hint on how to proceed.
    pub fn is_validation(&self) -> bool {
        matches!(self, ControllerError::Validation(_))
    }

    pub fn failure(&self) -> Option<&RequestFailure> {
        match self {
            ControllerError::Validation(_) => None,
            ControllerError::Upload(err) => Some(&err.failure),
            ControllerError::Query(err) => Some(&err.failure),
        }
    }
}
