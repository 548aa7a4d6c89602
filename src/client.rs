//! LINE Notify client
//!
//! [`NotifyClient`] owns the service registration and an injected
//! [`HttpTransport`]. The operations themselves live in [`crate::auth`]
//! (authorization flow) and [`crate::notify`] (send and revoke).

use std::sync::Arc;
use std::time::Duration;

use crate::config::NotifyConfig;
use crate::error::{NotifyError, Result};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
use crate::types::AccessToken;

macro_rules! oauth_base_url {
    () => {
        "https://notify-bot.line.me"
    };
}

macro_rules! api_base_url {
    () => {
        "https://notify-api.line.me"
    };
}

/// Base URL of the OAuth endpoints
pub const OAUTH_BASE_URL: &str = oauth_base_url!();
/// Base URL of the API endpoints
pub const API_BASE_URL: &str = api_base_url!();

/// Browser redirect target for user consent
pub const AUTHORIZE_URL: &str = concat!(oauth_base_url!(), "/oauth/authorize");
/// Authorization-code exchange endpoint
pub const TOKEN_URL: &str = concat!(oauth_base_url!(), "/oauth/token");
/// Token status (identity) endpoint
pub const STATUS_URL: &str = concat!(api_base_url!(), "/api/status");
/// Notification endpoint
pub const NOTIFY_URL: &str = concat!(api_base_url!(), "/api/notify");
/// Token revocation endpoint
pub const REVOKE_URL: &str = concat!(api_base_url!(), "/api/revoke");

/// Deadline applied to every remote call
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Builder for [`NotifyClient`]
#[derive(Default)]
pub struct NotifyClientBuilder {
    config: Option<NotifyConfig>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl NotifyClientBuilder {
    /// Create a new builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the service registration
    #[must_use]
    pub fn config(mut self, config: NotifyConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use a custom transport (default: [`ReqwestTransport`])
    #[must_use]
    pub fn transport(mut self, transport: impl HttpTransport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Use an already shared transport
    #[must_use]
    pub fn shared_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::InvalidConfig` if no configuration was set or it
    /// fails validation.
    pub fn build(self) -> Result<NotifyClient> {
        let config = self
            .config
            .ok_or_else(|| NotifyError::invalid_config("configuration not set"))?;
        config.validate()?;

        Ok(NotifyClient {
            config,
            transport: self
                .transport
                .unwrap_or_else(|| Arc::new(ReqwestTransport::new())),
        })
    }
}

/// Client for the LINE Notify service
///
/// Cheap to clone; clones share the configuration and transport. Holds no
/// mutable state, so one instance can serve any number of concurrent calls.
#[derive(Clone)]
pub struct NotifyClient {
    config: NotifyConfig,
    transport: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for NotifyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifyClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl NotifyClient {
    /// Create a client using the default `reqwest` transport
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::InvalidConfig` if the configuration is invalid.
    pub fn new(config: NotifyConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    /// Create a builder for custom transport injection
    #[must_use]
    pub fn builder() -> NotifyClientBuilder {
        NotifyClientBuilder::new()
    }

    /// Get the service registration
    #[must_use]
    pub fn config(&self) -> &NotifyConfig {
        &self.config
    }

    /// Send a request through the transport
    pub(crate) async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        tracing::debug!(method = %request.method, url = %request.url, "Sending request");
        let response = self.transport.execute(request).await?;
        tracing::debug!(status = response.status, "Received response");
        Ok(response)
    }

    /// GET `url` authenticated as `token`
    pub(crate) fn authenticated_get(url: &str, token: &AccessToken) -> HttpRequest {
        HttpRequest::get(url, REQUEST_TIMEOUT).bearer(token)
    }

    /// POST a form body to `url` authenticated as `token`
    pub(crate) fn authenticated_post(url: &str, token: &AccessToken, form: String) -> HttpRequest {
        HttpRequest::post(url, REQUEST_TIMEOUT)
            .bearer(token)
            .form(form)
    }
}

/// Extract a string field from a JSON object body.
///
/// An empty body, a missing field, `null`, or a non-object body gives `None`;
/// a body that is not JSON at all is an error. Non-string scalars are
/// rendered as text.
pub(crate) fn json_field(body: &str, field: &str) -> Result<Option<String>> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    let value: serde_json::Value = serde_json::from_str(body)?;
    Ok(match value.get(field) {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    })
}
