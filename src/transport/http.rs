//! `reqwest`-backed transport

use async_trait::async_trait;

use super::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use crate::error::{NotifyError, Result};

/// Default [`HttpTransport`] built on a shared `reqwest::Client`
///
/// `reqwest::Client` is reference counted internally, so cloning the
/// transport shares one connection pool.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http_client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with a fresh `reqwest::Client`
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport from a preconfigured `reqwest::Client`
    #[must_use]
    pub fn with_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }

    fn map_error(request: &HttpRequest, e: reqwest::Error) -> NotifyError {
        if e.is_timeout() {
            NotifyError::timeout(request.url.clone(), request.timeout.as_secs())
        } else {
            NotifyError::http(e.to_string())
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        };

        let mut builder = self
            .http_client
            .request(method, &request.url)
            .timeout(request.timeout);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&request, e))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| Self::map_error(&request, e))?;

        Ok(HttpResponse { status, body })
    }
}
