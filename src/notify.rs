//! Sending notifications and revoking tokens
//!
//! Single-recipient operations map one-to-one onto the `/api/notify` and
//! `/api/revoke` endpoints. The bulk variants fan the same call out over a set
//! of tokens concurrently, wait for every call to settle, and only then report
//! the failures (one [`BulkFailure`] per recipient). Nothing is cancelled when
//! a sibling fails and nothing is retried; recipients that succeeded before
//! the error was returned stay notified (or revoked).

use std::collections::HashSet;
use std::future::Future;

use futures::future::join_all;

use crate::client::{NOTIFY_URL, NotifyClient, REVOKE_URL};
use crate::error::{BulkFailure, NotifyError, Result};
use crate::types::AccessToken;
use crate::utils::encode_pairs;

impl NotifyClient {
    /// Send a text message to the recipient of `token`.
    ///
    /// # Errors
    ///
    /// - `NotifyError::Remote` with the response body and the token on a
    ///   non-success status
    /// - `NotifyError::Timeout` / `NotifyError::Http` from the transport
    pub async fn send_text(&self, token: &AccessToken, message: &str) -> Result<()> {
        let form = encode_pairs(&[("message", message)]);
        let response = self
            .execute(Self::authenticated_post(NOTIFY_URL, token, form))
            .await?;
        if !response.is_success() {
            return Err(NotifyError::remote(
                response.status,
                &response.body,
                Some(token.clone()),
            ));
        }
        Ok(())
    }

    /// Send the same text message to every token concurrently.
    ///
    /// Duplicate tokens are sent to once. An empty set succeeds without any
    /// request.
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::Bulk` listing every recipient that failed, after
    /// all sends have finished.
    pub async fn send_text_all<I, T>(&self, tokens: I, message: &str) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<AccessToken>,
    {
        fan_out("send", tokens, move |token| async move {
            self.send_text(&token, message).await
        })
        .await
    }

    /// Revoke `token`, unbinding its recipient. An empty token is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::Remote` with the response body on a non-success
    /// status, or a transport error.
    pub async fn revoke(&self, token: &AccessToken) -> Result<()> {
        if token.is_empty() {
            return Ok(());
        }

        let response = self
            .execute(Self::authenticated_post(REVOKE_URL, token, String::new()))
            .await?;
        if !response.is_success() {
            return Err(NotifyError::remote(
                response.status,
                &response.body,
                Some(token.clone()),
            ));
        }
        tracing::debug!("Token revoked");
        Ok(())
    }

    /// Revoke every token concurrently.
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::Bulk` listing every token whose revocation
    /// failed, after all revocations have finished.
    pub async fn revoke_all<I, T>(&self, tokens: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<AccessToken>,
    {
        fan_out("revoke", tokens, move |token| async move {
            self.revoke(&token).await
        })
        .await
    }
}

/// Run `op` once per distinct token, concurrently, and aggregate failures
async fn fan_out<I, T, F, Fut>(operation: &'static str, tokens: I, op: F) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<AccessToken>,
    F: Fn(AccessToken) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let tokens = distinct(tokens);
    if tokens.is_empty() {
        return Ok(());
    }
    let attempted = tokens.len();

    let outcomes = join_all(tokens.into_iter().map(|token| {
        let call = op(token.clone());
        async move { (token, call.await) }
    }))
    .await;

    let failures: Vec<BulkFailure> = outcomes
        .into_iter()
        .filter_map(|(token, outcome)| outcome.err().map(|error| BulkFailure { token, error }))
        .collect();

    if failures.is_empty() {
        tracing::debug!(operation, attempted, "Bulk operation succeeded");
        return Ok(());
    }

    tracing::warn!(
        operation,
        attempted,
        failed = failures.len(),
        "Bulk operation had failures"
    );
    Err(NotifyError::Bulk {
        attempted,
        failures,
    })
}

/// Deduplicate tokens, keeping first-seen order
fn distinct<I, T>(tokens: I) -> Vec<AccessToken>
where
    I: IntoIterator<Item = T>,
    T: Into<AccessToken>,
{
    let mut seen = HashSet::new();
    tokens
        .into_iter()
        .map(Into::into)
        .filter(|token: &AccessToken| seen.insert(token.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_distinct_keeps_first_seen_order() {
        let tokens = distinct(["B", "A", "B", "C", "A"]);
        let tokens: Vec<&str> = tokens.iter().map(AccessToken::as_str).collect();
        assert_eq!(tokens, vec!["B", "A", "C"]);
    }

    #[tokio::test]
    async fn test_fan_out_empty_set_runs_nothing() {
        let calls = AtomicUsize::new(0);
        let result = fan_out("test", Vec::<AccessToken>::new(), |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(()) }
        })
        .await;

        assert!(result.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fan_out_collects_every_failure() {
        let calls = AtomicUsize::new(0);
        let result = fan_out("test", ["A", "B", "C", "D"], |token| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if token.as_str() == "B" || token.as_str() == "D" {
                    Err(NotifyError::remote(500, "boom", Some(token)))
                } else {
                    Ok(())
                }
            }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 4);
        let err = result.unwrap_err();
        let NotifyError::Bulk { attempted, failures } = &err else {
            panic!("expected bulk error, got {err}");
        };
        assert_eq!(*attempted, 4);
        let failed: HashSet<&str> = failures.iter().map(|f| f.token.as_str()).collect();
        assert_eq!(failed, HashSet::from(["B", "D"]));
    }

    #[tokio::test]
    async fn test_fan_out_runs_calls_concurrently() {
        use std::time::{Duration, Instant};

        let start = Instant::now();
        let result = fan_out("test", ["A", "B", "C", "D", "E"], |_| async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok(())
        })
        .await;

        assert!(result.is_ok());
        // Sequential would take ~1s
        assert!(start.elapsed() < Duration::from_millis(800));
    }
}
