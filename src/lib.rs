//! `restful-fetcher` is an async HTTP request executor with retries.
//!
//! Transient failures are retried on a fixed backoff schedule (`[1s, 3s, 10s]`
//! by default) while client errors such as 404 fail immediately:
//! - [`RetryPolicy`] classifies each attempt
//! - [`RetryExecutor`] drives the attempt loop over a [`Transport`]
//! - [`RestClient`] exposes `get`, `post`, `put` and `delete`

mod body;
mod cancel;
mod client;
mod error;
mod executor;
mod headers;
mod options;
mod policy;
mod request;
mod transport;
mod types;

pub use body::Body;
pub use cancel::{cancellation, CancelHandle, CancelSignal};
pub use client::RestClient;
pub use error::{ExecutorError, FetchError, InvalidRequest, TransportError, TransportErrorKind};
pub use executor::RetryExecutor;
pub use headers::Headers;
pub use options::ClientOptions;
pub use policy::{RetryDecision, RetryPolicy, RetrySchedule};
pub use request::{QueryParams, RequestArgs, RequestSpec};
pub use transport::{ReqwestTransport, Transport};
pub use types::{AttemptKind, AttemptOutcome, Method, Response};

pub type Result<T> = std::result::Result<T, ExecutorError>;
