use std::collections::BTreeMap;

use crate::{Body, Headers, Method};

/// Query string parameters. Order is irrelevant.
pub type QueryParams = BTreeMap<String, String>;

/// Everything needed to perform one call. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestSpec {
    pub method: Method,
    pub url: String,
    pub query: QueryParams,
    pub body: Body,
    pub headers: Headers,
}

impl RequestSpec {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: QueryParams::new(),
            body: Body::Empty,
            headers: Headers::new(),
        }
    }

    /// Builds a request from per-verb arguments.
    ///
    /// An empty body on POST, PUT or DELETE becomes the JSON object `{}`.
    pub fn from_args(method: Method, args: RequestArgs) -> Self {
        let body = match (method, args.request_body) {
            (Method::Get, body) => body,
            (_, Body::Empty) => Body::Json(serde_json::json!({})),
            (_, body) => body,
        };
        Self {
            method,
            url: args.url,
            query: args.query_params,
            body,
            headers: args.custom_headers,
        }
    }
}

/// Arguments accepted by the per-verb client methods.
///
/// Every field except `url` defaults to empty.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestArgs {
    pub url: String,
    pub query_params: QueryParams,
    pub request_body: Body,
    pub custom_headers: Headers,
}

impl RequestArgs {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.insert(name.into(), value.into());
        self
    }

    pub fn body(mut self, body: impl Into<Body>) -> Self {
        self.request_body = body.into();
        self
    }

    /// Adds a header; a later call with the same name wins.
    pub fn header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.custom_headers.insert(name, value);
        self
    }

    pub fn headers(mut self, headers: Headers) -> Self {
        self.custom_headers.merge(headers);
        self
    }
}

impl From<&str> for RequestArgs {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

impl From<String> for RequestArgs {
    fn from(url: String) -> Self {
        Self::new(url)
    }
}
