//! Error types for request building and response handling.
//!
//! # Design
//! Every failure is terminal and reaches the caller through the same channel
//! as success. Classification precedence is fixed: a transport failure wins
//! over any status inspection, and an unknown code wins over a known status
//! that is invalid for the method. Decoding failures deliberately drop the
//! codec's message so callers match on the kind only.

use thiserror::Error;

use crate::status::ResponseStatus;

/// Failures reported by a [`Transport`](crate::Transport).
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connection(String),

    /// The in-flight call was aborted before it produced an outcome.
    #[error("request was cancelled")]
    Cancelled,

    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

/// Errors returned by the builder and the send pipeline.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// No transport error, but no body was delivered either.
    #[error("response had no content")]
    EmptyResponse,

    /// The status code is neither a named status nor a 5xx.
    #[error("unknown response code {0}")]
    UnknownResponseCode(u16),

    /// A recognized status that the request's method does not accept.
    #[error("unexpected response status {0}")]
    UnexpectedStatus(ResponseStatus),

    #[error("failed to decode response body")]
    DecodingFailure,

    #[error("failed to encode request body: {0}")]
    Encoding(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// The status that caused the failure, if one was recognized.
    pub fn status(&self) -> Option<ResponseStatus> {
        match self {
            ApiError::UnexpectedStatus(status) => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_errors_convert() {
        let err: ApiError = TransportError::Timeout.into();
        assert!(matches!(err, ApiError::Transport(TransportError::Timeout)));
        assert_eq!(err.to_string(), "transport error: request timed out");
    }

    #[test]
    fn unexpected_status_exposes_status() {
        let err = ApiError::UnexpectedStatus(ResponseStatus::Created);
        assert_eq!(err.status(), Some(ResponseStatus::Created));
        assert_eq!(err.to_string(), "unexpected response status 201 Created");
        assert_eq!(ApiError::DecodingFailure.status(), None);
    }

    #[test]
    fn other_transport_error_is_transparent() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err = TransportError::Other(Box::new(io));
        assert_eq!(err.to_string(), "boom");
    }
}
