//! Error types for the LINE Notify client

use std::fmt;

use thiserror::Error;

use crate::types::AccessToken;
use crate::utils::truncate_for_display;

/// Maximum number of response-body bytes kept in an error
pub const MAX_ERROR_BODY_BYTES: usize = 1024;

/// Main error type for the LINE Notify client
#[derive(Error, Debug)]
pub enum NotifyError {
    /// Caller passed an authorization code the exchange cannot use
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid or incomplete client configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Remote service answered with a non-success status
    #[error("Remote error (HTTP {status}): {body}{}", token_suffix(.token.as_ref()))]
    Remote {
        /// HTTP status code
        status: u16,
        /// Raw response body (truncated)
        body: String,
        /// Token the failing request was made with, if relevant
        token: Option<AccessToken>,
    },

    /// Request exceeded its deadline
    #[error("Timeout after {timeout_secs} seconds: {url}")]
    Timeout {
        /// Request URL
        url: String,
        /// Deadline that was exceeded
        timeout_secs: u64,
    },

    /// Transport-level failure (connect, DNS, TLS)
    #[error("HTTP transport error: {0}")]
    Http(String),

    /// Success response whose body is not valid JSON
    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    /// One or more recipients of a bulk operation failed
    #[error("{} of {attempted} recipients failed: {}", .failures.len(), DisplayFailures(.failures))]
    Bulk {
        /// Number of distinct tokens attempted
        attempted: usize,
        /// Per-recipient failures
        failures: Vec<BulkFailure>,
    },
}

/// Result type alias for LINE Notify operations
pub type Result<T> = std::result::Result<T, NotifyError>;

/// A single recipient's failure inside [`NotifyError::Bulk`]
#[derive(Debug)]
pub struct BulkFailure {
    /// Token of the recipient that failed
    pub token: AccessToken,
    /// Underlying error
    pub error: NotifyError,
}

impl fmt::Display for BulkFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.token, self.error)
    }
}

struct DisplayFailures<'a>(&'a [BulkFailure]);

impl fmt::Display for DisplayFailures<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{failure}")?;
        }
        Ok(())
    }
}

fn token_suffix(token: Option<&AccessToken>) -> String {
    token.map(|t| format!(", token: {t}")).unwrap_or_default()
}

impl NotifyError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an invalid configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a remote error, truncating the body
    pub fn remote(status: u16, body: impl AsRef<str>, token: Option<AccessToken>) -> Self {
        Self::Remote {
            status,
            body: truncate_for_display(body.as_ref(), MAX_ERROR_BODY_BYTES),
            token,
        }
    }

    /// Create a timeout error
    pub fn timeout(url: impl Into<String>, timeout_secs: u64) -> Self {
        Self::Timeout {
            url: url.into(),
            timeout_secs,
        }
    }

    /// Create a transport error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// True for failures reported by (or waiting on) the remote service
    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. } | Self::Timeout { .. })
    }

    /// HTTP status of a [`NotifyError::Remote`]
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Per-recipient failures of a [`NotifyError::Bulk`], empty otherwise
    #[must_use]
    pub fn failures(&self) -> &[BulkFailure] {
        match self {
            Self::Bulk { failures, .. } => failures,
            _ => &[],
        }
    }
}
