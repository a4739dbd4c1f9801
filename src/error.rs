use std::fmt;

use crate::types::{AttemptKind, Method};

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Broad classification of a failed attempt that produced no response.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TransportErrorKind {
    /// The per-attempt timeout elapsed.
    Timeout,
    /// Connection could not be established (refused, DNS, TLS).
    Connect,
    /// The response body could not be read.
    Body,
    /// Any other request execution failure.
    Request,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Timeout => "timeout",
            Self::Connect => "connect",
            Self::Body => "body",
            Self::Request => "request",
        };
        f.write_str(label)
    }
}

/// The underlying call could not complete. Always retryable.
#[derive(Debug, thiserror::Error)]
#[error("{kind} failure: {source}")]
pub struct TransportError {
    kind: TransportErrorKind,
    #[source]
    source: BoxError,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, source: impl Into<BoxError>) -> Self {
        Self {
            kind,
            source: source.into(),
        }
    }

    pub fn kind(&self) -> TransportErrorKind {
        self.kind
    }

    pub fn is_timeout(&self) -> bool {
        self.kind == TransportErrorKind::Timeout
    }
}

/// A request that cannot be sent at all, such as an unparsable URL.
///
/// Never retried: it is reported as soon as the transport raises it.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("invalid request: {0}")]
pub struct InvalidRequest(pub String);

/// Cause of a failed call.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Network, timeout or body read failure on the last attempt.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
    /// Non-success HTTP status code with raw response body.
    #[error("http error {status}: {body}")]
    Http { status: u16, body: String },
    /// The transport rejected the request before sending it.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidRequest),
    /// The caller's cancellation signal fired.
    #[error("request cancelled")]
    Cancelled,
}

/// Error returned to callers once a request has terminally failed.
#[derive(Debug, thiserror::Error)]
#[error("Unable to {method} request to url {url}: {cause}")]
pub struct ExecutorError {
    pub method: Method,
    pub url: String,
    /// Number of attempts handed to the transport.
    pub attempts: usize,
    /// Classification of every attempt, in order.
    pub trail: Vec<AttemptKind>,
    #[source]
    pub cause: FetchError,
}

impl ExecutorError {
    /// HTTP status of the last response, if the call failed on one.
    pub fn status(&self) -> Option<u16> {
        match &self.cause {
            FetchError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.cause, FetchError::Cancelled)
    }

    pub fn is_timeout(&self) -> bool {
        matches!(&self.cause, FetchError::Transport(err) if err.is_timeout())
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::{ExecutorError, FetchError};
    use crate::types::{AttemptKind, Method};

    #[test]
    fn message_names_method_url_and_cause() {
        let err = ExecutorError {
            method: Method::Post,
            url: "https://api.test/items".to_owned(),
            attempts: 1,
            trail: vec![AttemptKind::HttpError(404)],
            cause: FetchError::Http {
                status: 404,
                body: "missing".to_owned(),
            },
        };

        assert_eq!(
            err.to_string(),
            "Unable to POST request to url https://api.test/items: http error 404: missing"
        );
        assert_eq!(err.status(), Some(404));
        assert!(err.source().is_some());
    }
}
