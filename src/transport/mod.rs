//! HTTP transport abstraction
//!
//! The client never talks to `reqwest` directly. Every remote call is
//! expressed as an [`HttpRequest`] handed to an [`HttpTransport`], which
//! returns the status code and raw body. This keeps connection pooling out of
//! the client and lets tests substitute an in-memory transport.

mod http;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::AccessToken;

pub use http::ReqwestTransport;

/// Content type used for every request body
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Capability to perform one HTTP request
///
/// Implementations must be safe to call concurrently; bulk operations issue
/// one `execute` per recipient at the same time.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Perform the request and return its status and body
    ///
    /// A non-success status is NOT an error at this layer.
    ///
    /// # Errors
    /// Returns `NotifyError::Timeout` if `request.timeout` elapses, or
    /// `NotifyError::Http` if the request could not be completed.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
        }
    }
}

/// Outgoing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Method
    pub method: HttpMethod,
    /// Absolute URL, query string included
    pub url: String,
    /// Header name/value pairs
    pub headers: Vec<(String, String)>,
    /// Form-encoded body, if any
    pub body: Option<String>,
    /// Deadline for the whole request
    pub timeout: Duration,
}

impl HttpRequest {
    fn new(method: HttpMethod, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
            timeout,
        }
    }

    /// Create a GET request
    pub fn get(url: impl Into<String>, timeout: Duration) -> Self {
        Self::new(HttpMethod::Get, url, timeout)
    }

    /// Create a POST request
    pub fn post(url: impl Into<String>, timeout: Duration) -> Self {
        Self::new(HttpMethod::Post, url, timeout)
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Authenticate with a bearer token
    #[must_use]
    pub fn bearer(self, token: &AccessToken) -> Self {
        self.header("Authorization", token.authorization_header())
    }

    /// Set an already form-encoded body
    #[must_use]
    pub fn form(mut self, encoded: impl Into<String>) -> Self {
        self.body = Some(encoded.into());
        self.header("Content-Type", FORM_CONTENT_TYPE)
    }

    /// Look up a header value (case-insensitive)
    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Token from the `Authorization: Bearer` header
    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        self.header_value("Authorization")?.strip_prefix("Bearer ")
    }
}

/// Response status and raw body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Body text
    pub body: String,
}

impl HttpResponse {
    /// Create a response
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for 2xx statuses
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
