use std::fmt;

use serde::de::DeserializeOwned;

use crate::{error::TransportErrorKind, Headers, TransportError};

/// HTTP methods supported by the executor.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A received HTTP response, whatever its status.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub headers: Headers,
    pub body: String,
}

impl Response {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Headers::new(),
            body: body.into(),
        }
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    pub fn text(&self) -> &str {
        &self.body
    }

    /// Decodes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.body)
    }
}

/// Result of a single transport attempt.
#[derive(Debug)]
pub enum AttemptOutcome {
    /// The call could not complete (network failure, timeout).
    TransportError(TransportError),
    /// A response was received; the status may be an error status.
    Response(Response),
}

impl AttemptOutcome {
    pub fn kind(&self) -> AttemptKind {
        match self {
            Self::TransportError(err) => AttemptKind::Transport(err.kind()),
            Self::Response(response) if response.is_success() => {
                AttemptKind::Success(response.status)
            }
            Self::Response(response) => AttemptKind::HttpError(response.status),
        }
    }
}

impl From<Response> for AttemptOutcome {
    fn from(response: Response) -> Self {
        Self::Response(response)
    }
}

impl From<TransportError> for AttemptOutcome {
    fn from(err: TransportError) -> Self {
        Self::TransportError(err)
    }
}

/// Classification of one attempt, kept for diagnostics.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AttemptKind {
    Success(u16),
    HttpError(u16),
    Transport(TransportErrorKind),
}

impl fmt::Display for AttemptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(status) => write!(f, "success {status}"),
            Self::HttpError(status) => write!(f, "http error {status}"),
            Self::Transport(kind) => write!(f, "transport {kind}"),
        }
    }
}
