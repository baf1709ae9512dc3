//! HTTP transport towards the Graph API.
//!
//! The adapter only talks to the [`Transport`] trait. [`GraphTransport`] is
//! the `reqwest` implementation used in practice; it is handed a bearer token
//! and never acquires or refreshes one itself.

use std::io::Write;
use std::time::Duration;

use reqwest::Method;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub const DEFAULT_API_BASE_URL: &str = "https://graph.microsoft.com/v1.0";
const USER_AGENT: &str = concat!("graphfs/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,
    Json(serde_json::Value),
    Bytes(Vec<u8>),
}

/// A request against the API. `url` is either a path relative to the API
/// base (`/me/drive/root:/a.txt`) or an absolute URL handed out by the API
/// itself, such as an upload session or a paging link.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Body,
    /// Send without any request timeout.
    pub no_timeout: bool,
}

impl Request {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: Body::Empty,
            no_timeout: false,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::PUT, url)
    }

    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(Method::PATCH, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, url)
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    pub fn json(mut self, value: serde_json::Value) -> Self {
        self.body = Body::Json(value);
        self
    }

    pub fn bytes(mut self, bytes: Vec<u8>) -> Self {
        self.body = Body::Bytes(bytes);
        self
    }

    pub fn without_timeout(mut self) -> Self {
        self.no_timeout = true;
        self
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A successful (2xx) response.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, TransportError> {
        serde_json::from_slice(&self.body).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

/// Transport failure, classified so callers can tell a missing item apart
/// from every other kind of failure.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("not found ({status}): {body}")]
    NotFound { status: u16, body: String },

    #[error("client error ({status}): {body}")]
    Client { status: u16, body: String },

    #[error("server error ({status}): {body}")]
    Server { status: u16, body: String },

    #[error("request failed: {0}")]
    Network(String),

    #[error("invalid response body: {0}")]
    Decode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TransportError {
    /// Classify a non-success status code.
    pub fn from_status(status: u16, body: &str) -> Self {
        let body = sanitize(body);
        match status {
            404 | 410 => TransportError::NotFound { status, body },
            400..=499 => TransportError::Client { status, body },
            _ => TransportError::Server { status, body },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, TransportError::NotFound { .. })
    }

    /// True for every 4xx answer, including not found.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            TransportError::NotFound { .. } | TransportError::Client { .. }
        )
    }
}

pub trait Transport: Send + Sync {
    /// Send a request and buffer the whole response body.
    fn execute(&self, request: Request) -> Result<Response, TransportError>;

    /// Send a request and stream the response body into `sink`, returning the
    /// number of bytes written.
    fn download(&self, request: Request, sink: &mut dyn Write) -> Result<u64, TransportError>;
}

pub struct GraphTransportConfig {
    pub api_base_url: String,
    pub access_token: String,
    /// Applied to every request not flagged `no_timeout`.
    pub request_timeout: Option<Duration>,
}

/// Blocking `reqwest` transport for the Graph API.
pub struct GraphTransport {
    http: reqwest::blocking::Client,
    api_base_url: String,
    access_token: String,
    request_timeout: Option<Duration>,
}

impl GraphTransport {
    pub fn new(access_token: impl Into<String>) -> Result<Self, TransportError> {
        Self::from_config(GraphTransportConfig {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            access_token: access_token.into(),
            request_timeout: Some(Duration::from_secs(30)),
        })
    }

    pub fn from_config(cfg: GraphTransportConfig) -> Result<Self, TransportError> {
        // Timeouts are applied per request so chunk uploads can opt out.
        let http = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| TransportError::Network(format!("failed to build http client: {e}")))?;

        Ok(Self {
            http,
            api_base_url: cfg.api_base_url,
            access_token: cfg.access_token,
            request_timeout: cfg.request_timeout,
        })
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Absolute URLs on the API's own origin, such as `@odata.nextLink`
    /// paging links, still need the bearer token.
    fn is_api_origin(&self, url: &reqwest::Url) -> bool {
        reqwest::Url::parse(&self.api_base_url)
            .map(|base| base.origin() == url.origin())
            .unwrap_or(false)
    }

    /// Resolve an API-relative path against the base URL, percent-encoding
    /// each segment. Absolute URLs pass through untouched.
    fn resolve(&self, url: &str) -> Result<reqwest::Url, TransportError> {
        if is_absolute(url) {
            return reqwest::Url::parse(url)
                .map_err(|e| TransportError::Network(format!("invalid url {url}: {e}")));
        }

        let mut resolved = reqwest::Url::parse(&self.api_base_url).map_err(|e| {
            TransportError::Network(format!("invalid api base url {}: {e}", self.api_base_url))
        })?;
        resolved
            .path_segments_mut()
            .map_err(|_| {
                TransportError::Network(format!(
                    "api base url {} cannot carry a path",
                    self.api_base_url
                ))
            })?
            .pop_if_empty()
            .extend(url.split('/').filter(|s| !s.is_empty()));
        Ok(resolved)
    }

    fn send(&self, request: Request) -> Result<reqwest::blocking::Response, TransportError> {
        let url = self.resolve(&request.url)?;
        tracing::debug!(method = %request.method, url = %url, "graph request");

        let authenticate = !is_absolute(&request.url) || self.is_api_origin(&url);
        let mut rb = self.http.request(request.method, url);
        // Upload session URLs live on other hosts and are pre-authenticated.
        if authenticate {
            rb = rb.bearer_auth(&self.access_token);
        }
        for (name, value) in &request.headers {
            // reqwest derives the length from the body itself
            if name.eq_ignore_ascii_case("content-length") {
                continue;
            }
            rb = rb.header(name.as_str(), value.as_str());
        }
        rb = match request.body {
            Body::Empty => rb,
            Body::Json(value) => rb.json(&value),
            Body::Bytes(bytes) => rb.body(bytes),
        };
        if !request.no_timeout {
            if let Some(timeout) = self.request_timeout {
                rb = rb.timeout(timeout);
            }
        }

        let response = rb
            .send()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        let status = response.status();
        tracing::trace!(status = status.as_u16(), "graph response");
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(TransportError::from_status(status.as_u16(), &body));
        }
        Ok(response)
    }
}

impl Transport for GraphTransport {
    fn execute(&self, request: Request) -> Result<Response, TransportError> {
        let response = self.send(request)?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(Response {
            status,
            body: body.to_vec(),
        })
    }

    fn download(&self, request: Request, sink: &mut dyn Write) -> Result<u64, TransportError> {
        let mut response = self.send(request)?;
        Ok(std::io::copy(&mut response, sink)?)
    }
}

fn is_absolute(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

fn sanitize(s: &str) -> String {
    if s.len() > 240 {
        let mut end = 240;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    } else {
        s.to_string()
    }
}
