use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::{
    AttemptOutcome, Body, Headers, InvalidRequest, RequestSpec, Response, TransportError,
    TransportErrorKind,
};

/// Performs a single HTTP attempt.
///
/// Implementations must not retry, must report error statuses as
/// [`AttemptOutcome::Response`] and connection or timeout failures as
/// [`AttemptOutcome::TransportError`]. `Err` is reserved for requests that
/// cannot be sent at all.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, spec: &RequestSpec) -> Result<AttemptOutcome, InvalidRequest>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, spec: &RequestSpec) -> Result<AttemptOutcome, InvalidRequest> {
        (**self).send(spec).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn send(&self, spec: &RequestSpec) -> Result<AttemptOutcome, InvalidRequest> {
        (**self).send(spec).await
    }
}

/// [`Transport`] backed by `reqwest`.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    http: reqwest::Client,
    timeout: Duration,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Self {
        Self::with_client(reqwest::Client::new(), timeout)
    }

    /// Wraps an existing client, e.g. one configured with TLS or proxy settings.
    pub fn with_client(http: reqwest::Client, timeout: Duration) -> Self {
        Self { http, timeout }
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn build(&self, spec: &RequestSpec) -> Result<reqwest::RequestBuilder, InvalidRequest> {
        let url = reqwest::Url::parse(&spec.url)
            .map_err(|err| InvalidRequest(format!("malformed url '{}': {err}", spec.url)))?;

        let mut request = self
            .http
            .request(spec.method.into(), url)
            .timeout(self.timeout)
            .headers(header_map(&spec.headers)?);

        if !spec.query.is_empty() {
            request = request.query(&spec.query);
        }

        request = match &spec.body {
            Body::Empty => request,
            Body::Json(value) => request.json(value),
            Body::Text(text) => request.body(text.clone()),
            Body::Bytes(bytes) => request.body(bytes.clone()),
        };
        Ok(request)
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new(Duration::from_millis(10_000))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, spec: &RequestSpec) -> Result<AttemptOutcome, InvalidRequest> {
        let response = match self.build(spec)?.send().await {
            Ok(response) => response,
            Err(err) if err.is_builder() => {
                return Err(InvalidRequest(err.to_string()));
            }
            Err(err) => return Ok(AttemptOutcome::TransportError(transport_error(err))),
        };

        let status = response.status().as_u16();
        let headers = response_headers(response.headers());
        match response.text().await {
            Ok(body) => Ok(AttemptOutcome::Response(Response {
                status,
                headers,
                body,
            })),
            Err(err) => Ok(AttemptOutcome::TransportError(transport_error(err))),
        }
    }
}

fn transport_error(err: reqwest::Error) -> TransportError {
    let kind = if err.is_timeout() {
        TransportErrorKind::Timeout
    } else if err.is_connect() {
        TransportErrorKind::Connect
    } else if err.is_body() || err.is_decode() {
        TransportErrorKind::Body
    } else {
        TransportErrorKind::Request
    };
    TransportError::new(kind, err)
}

fn header_map(headers: &Headers) -> Result<HeaderMap, InvalidRequest> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers.iter() {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|err| InvalidRequest(format!("invalid header name '{name}': {err}")))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|err| InvalidRequest(format!("invalid value for header '{name}': {err}")))?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

fn response_headers(map: &HeaderMap) -> Headers {
    map.iter()
        .map(|(name, value)| {
            (
                name.as_str(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}
