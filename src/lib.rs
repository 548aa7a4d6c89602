//! # LINE Notify client for Rust
//!
//! Async client for the LINE Notify push service: OAuth2 authorization-code
//! exchange, token identity lookup, text notifications to one or many
//! recipients, and token revocation.
//!
//! ## Quick Start
//!
//! ```no_run
//! use line_notify_client::{AccessToken, NotifyClient, NotifyConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = NotifyConfig::builder()
//!         .client_id("my-client-id")
//!         .client_secret("my-client-secret")
//!         .callback_url("https://example.com/line/callback")
//!         .build();
//!     let client = NotifyClient::new(config)?;
//!
//!     client
//!         .send_text(&AccessToken::new("stored-token"), "Deploy finished")
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Bulk Operations
//!
//! [`NotifyClient::send_text_all`] and [`NotifyClient::revoke_all`] run one
//! request per distinct token concurrently and wait for all of them. If any
//! recipient fails, the call returns [`NotifyError::Bulk`] listing each
//! failed token with its own error:
//!
//! ```no_run
//! # use line_notify_client::{NotifyClient, NotifyError};
//! # async fn example(client: NotifyClient) {
//! match client.send_text_all(["token-a", "token-b"], "Server is down").await {
//!     Ok(()) => {}
//!     Err(NotifyError::Bulk { attempted, failures }) => {
//!         for failure in &failures {
//!             eprintln!("{}/{attempted} failed: {}", failure.token, failure.error);
//!         }
//!     }
//!     Err(e) => eprintln!("Error: {e}"),
//! }
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`client`]: [`NotifyClient`], builder, endpoint constants
//! - [`auth`]: authorization URL, code exchange, identity lookup
//! - [`notify`]: send and revoke, single and bulk
//! - [`transport`]: [`HttpTransport`] trait and the `reqwest` implementation
//! - [`config`]: [`NotifyConfig`] and environment loading
//! - [`types`]: token newtypes and [`UserProfile`]
//! - [`error`]: error types and handling
//!
//! ## Custom Transport
//!
//! Any [`HttpTransport`] can be injected, for example to share a
//! preconfigured `reqwest::Client` or to test without network:
//!
//! ```no_run
//! # use line_notify_client::{NotifyClient, NotifyConfig, ReqwestTransport};
//! # fn example(config: NotifyConfig) -> line_notify_client::Result<()> {
//! let http = reqwest::Client::builder().user_agent("my-app/1.0").build().unwrap();
//! let client = NotifyClient::builder()
//!     .config(config)
//!     .transport(ReqwestTransport::with_client(http))
//!     .build()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! This crate uses [`tracing`](https://crates.io/crates/tracing) for structured logging.
//! Events are zero-cost when no subscriber is attached. Tokens and secrets are
//! never logged. To see logs, attach a subscriber in your application:
//!
//! ```rust,ignore
//! tracing_subscriber::fmt::init();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod notify;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use auth::{NOTIFY_SCOPE, STATE_MARKER};
pub use client::{NotifyClient, NotifyClientBuilder, REQUEST_TIMEOUT};
pub use config::NotifyConfig;
pub use error::{BulkFailure, NotifyError, Result};
pub use transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
pub use types::{AccessToken, AuthorizationCode, UserProfile};

/// Version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
