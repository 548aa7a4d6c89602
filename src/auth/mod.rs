//! OAuth2 authorization-code flow for LINE Notify
//!
//! # Overview
//!
//! LINE Notify issues one access token per recipient (a user or a group chat
//! the user picks on the consent screen). The flow works as follows:
//!
//! 1. Redirect the user's browser to [`NotifyClient::authorization_url`]
//! 2. LINE redirects back to the configured callback URL with `?code=...`
//! 3. The hosting application passes that code to [`NotifyClient::authorize`]
//! 4. The returned [`UserProfile`] carries the token and the recipient name
//!
//! # Example
//!
//! ```no_run
//! use line_notify_client::{AuthorizationCode, NotifyClient, NotifyConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = NotifyClient::new(NotifyConfig::from_env()?)?;
//!
//!     // Send the browser here
//!     println!("{}", client.authorization_url());
//!
//!     // ...later, in the callback handler
//!     let profile = client.authorize(&AuthorizationCode::new("code-from-callback")).await?;
//!     println!("Bound to {:?}", profile.name);
//!     Ok(())
//! }
//! ```
//!
//! Storing the token is the caller's job; this crate never persists it.
//!
//! [`NotifyClient::authorization_url`]: crate::NotifyClient::authorization_url
//! [`NotifyClient::authorize`]: crate::NotifyClient::authorize
//! [`UserProfile`]: crate::UserProfile

mod oauth;

pub use oauth::{NOTIFY_SCOPE, STATE_MARKER};
