//! Result of a completed authorization flow

use serde::{Deserialize, Serialize};

use super::identifiers::AccessToken;

/// Token and display name produced by [`NotifyClient::authorize`](crate::NotifyClient::authorize)
///
/// Not persisted by this crate. The hosting application decides where the
/// token lives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Access token, absent if the code was empty or the token endpoint
    /// returned no `access_token`
    pub token: Option<AccessToken>,
    /// Display name of the token's target (user or group), absent if the
    /// status lookup failed
    pub name: Option<String>,
}
