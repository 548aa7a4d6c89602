//! Authorization URL, code exchange, and token identity lookup

use crate::client::{AUTHORIZE_URL, NotifyClient, REQUEST_TIMEOUT, STATUS_URL, TOKEN_URL, json_field};
use crate::error::{NotifyError, Result};
use crate::transport::HttpRequest;
use crate::types::{AccessToken, AuthorizationCode, UserProfile};
use crate::utils::encode_pairs;

/// Scope requested on the consent screen
pub const NOTIFY_SCOPE: &str = "notify";
/// Fixed `state` value sent with the authorization request
pub const STATE_MARKER: &str = "NO_STATE";

impl NotifyClient {
    /// Build the URL the user's browser is redirected to for consent.
    ///
    /// Pure function of the configuration: no I/O, always the same output.
    #[must_use]
    pub fn authorization_url(&self) -> String {
        let config = self.config();
        let query = encode_pairs(&[
            ("response_type", "code"),
            ("client_id", config.client_id.as_str()),
            ("redirect_uri", config.callback_url.as_str()),
            ("scope", NOTIFY_SCOPE),
            ("state", STATE_MARKER),
        ]);
        format!("{AUTHORIZE_URL}?{query}")
    }

    /// Exchange an authorization code for an access token.
    ///
    /// An empty code returns `Ok(None)` without touching the network. A
    /// success response without an `access_token` field also gives `None`.
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::Remote` carrying the status on a non-success
    /// response, `NotifyError::Timeout` if the request deadline passes, and
    /// `NotifyError::Json` if a success body is not JSON.
    pub async fn exchange_code(&self, code: &AuthorizationCode) -> Result<Option<AccessToken>> {
        if code.is_empty() {
            return Ok(None);
        }

        let config = self.config();
        let form = encode_pairs(&[
            ("grant_type", "authorization_code"),
            ("code", code.as_str()),
            ("redirect_uri", config.callback_url.as_str()),
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
        ]);

        tracing::debug!("Exchanging authorization code");
        let response = self
            .execute(HttpRequest::post(TOKEN_URL, REQUEST_TIMEOUT).form(form))
            .await?;
        if !response.is_success() {
            return Err(NotifyError::remote(response.status, &response.body, None));
        }

        Ok(json_field(&response.body, "access_token")?.map(AccessToken::from))
    }

    /// Look up the display name of the recipient a token notifies.
    ///
    /// Lenient: an empty token or a non-success status yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns transport failures (`NotifyError::Timeout`,
    /// `NotifyError::Http`) and `NotifyError::Json` for a malformed success
    /// body.
    pub async fn resolve_identity(&self, token: &AccessToken) -> Result<Option<String>> {
        if token.is_empty() {
            return Ok(None);
        }

        let response = self
            .execute(Self::authenticated_get(STATUS_URL, token))
            .await?;
        if !response.is_success() {
            tracing::debug!(status = response.status, "Token status lookup rejected");
            return Ok(None);
        }

        json_field(&response.body, "target")
    }

    /// Complete the authorization flow: exchange the code, then resolve the
    /// recipient name.
    ///
    /// The token is returned even when the name lookup is rejected.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`exchange_code`](Self::exchange_code) and
    /// [`resolve_identity`](Self::resolve_identity).
    pub async fn authorize(&self, code: &AuthorizationCode) -> Result<UserProfile> {
        let token = self.exchange_code(code).await?;
        let name = match &token {
            Some(token) => self.resolve_identity(token).await?,
            None => None,
        };
        Ok(UserProfile { token, name })
    }
}
