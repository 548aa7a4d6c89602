//! Client configuration
//!
//! A [`NotifyConfig`] holds the three values LINE issues when a Notify
//! service is registered: client id, client secret, and the callback URL the
//! authorization redirect returns to. It is immutable once built and shared by
//! reference across concurrent requests.

use std::fmt;

use typed_builder::TypedBuilder;

use crate::error::{NotifyError, Result};

/// Environment variable holding the client id
pub const ENV_CLIENT_ID: &str = "LINE_NOTIFY_CLIENT_ID";
/// Environment variable holding the client secret
pub const ENV_CLIENT_SECRET: &str = "LINE_NOTIFY_CLIENT_SECRET";
/// Environment variable holding the callback URL
pub const ENV_CALLBACK_URL: &str = "LINE_NOTIFY_CALLBACK_URL";

/// LINE Notify service registration
///
/// # Example
///
/// ```
/// use line_notify_client::NotifyConfig;
///
/// let config = NotifyConfig::builder()
///     .client_id("my-client")
///     .client_secret("s3cret")
///     .callback_url("https://example.com/line/callback")
///     .build();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, PartialEq, Eq, TypedBuilder)]
pub struct NotifyConfig {
    /// OAuth client id
    #[builder(setter(into))]
    pub client_id: String,
    /// OAuth client secret
    #[builder(setter(into))]
    pub client_secret: String,
    /// Redirect URI registered for the service
    #[builder(setter(into))]
    pub callback_url: String,
}

impl NotifyConfig {
    /// Load configuration from `LINE_NOTIFY_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::InvalidConfig` naming the first missing variable.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| {
            lookup(key).ok_or_else(|| NotifyError::invalid_config(format!("{key} is not set")))
        };

        let config = Self {
            client_id: get(ENV_CLIENT_ID)?,
            client_secret: get(ENV_CLIENT_SECRET)?,
            callback_url: get(ENV_CALLBACK_URL)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that the values needed to build an authorization URL are present
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::InvalidConfig` if the client id or callback URL
    /// is empty.
    pub fn validate(&self) -> Result<()> {
        if self.client_id.trim().is_empty() {
            return Err(NotifyError::invalid_config("client_id is empty"));
        }
        if self.callback_url.trim().is_empty() {
            return Err(NotifyError::invalid_config("callback_url is empty"));
        }
        Ok(())
    }
}

impl fmt::Debug for NotifyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifyConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("callback_url", &self.callback_url)
            .finish()
    }
}
