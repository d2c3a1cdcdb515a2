//! The HTTP seam between the client and the running application.

use log::{debug, trace};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Host the application listens on.
pub const DEFAULT_HOST: &str = "localhost";

/// Client-wide timeout for every request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP verbs used by the Data API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        })
    }
}

/// One request to the application.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub port: u16,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl Request {
    pub fn new(method: Method, port: u16, path: impl Into<String>) -> Self {
        Self {
            method,
            port,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Appends a query parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Appends several query parameters in order.
    pub fn params<I>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.query.extend(params);
        self
    }

    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Returns the value of the first query parameter named `key`.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// The status and raw body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Status line plus body, for error messages.
    pub fn dump(&self) -> String {
        format!("HTTP {}\n{}", self.status, self.body)
    }
}

/// A request that never produced a response.
#[derive(Debug, Error)]
#[error("{method} {url} failed: {source}")]
pub struct TransportError {
    pub method: Method,
    pub url: String,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

/// Sends requests to the application.
///
/// Implementations must not retry: every call maps to at most one request.
pub trait Transport {
    fn send(&self, request: &Request) -> Result<Response, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &Request) -> Result<Response, TransportError> {
        (**self).send(request)
    }
}

/// Plain-HTTP transport backed by reqwest's blocking client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    host: String,
}

impl HttpTransport {
    /// Builds a transport for `host` with the client-wide timeout.
    ///
    /// The application only listens locally, so proxy settings are ignored.
    pub fn new(host: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("joplink/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .no_proxy()
            .build()?;
        Ok(Self {
            client,
            host: host.into(),
        })
    }

    fn url(&self, request: &Request) -> String {
        format!("http://{}:{}{}", self.host, request.port, request.path)
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &Request) -> Result<Response, TransportError> {
        let url = self.url(request);
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &url).query(&request.query);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        // reqwest's messages embed the full URL, query string and token included.
        let fail = |source: reqwest::Error| TransportError {
            method: request.method,
            url: url.clone(),
            source: Box::new(source.without_url()),
        };

        let response = builder.send().map_err(fail)?;
        let status = response.status().as_u16();
        let body = response.text().map_err(fail)?;

        debug!(
            "event=http_request method={} path={} status={}",
            request.method, request.path, status
        );
        trace!("event=http_response path={} bytes={}", request.path, body.len());

        Ok(Response { status, body })
    }
}
