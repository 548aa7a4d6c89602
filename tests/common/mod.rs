//! In-memory transport shared by the integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use line_notify_client::{
    HttpRequest, HttpResponse, HttpTransport, NotifyClient, NotifyConfig, Result,
};

type Responder = Box<dyn Fn(&HttpRequest) -> Result<HttpResponse> + Send + Sync>;

/// Records every request and answers from a scripted responder
pub struct MockTransport {
    requests: Mutex<Vec<HttpRequest>>,
    responder: Responder,
    delay: Option<Duration>,
}

impl MockTransport {
    pub fn new(
        responder: impl Fn(&HttpRequest) -> Result<HttpResponse> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            responder: Box::new(responder),
            delay: None,
        })
    }

    /// Like `new`, but every response is delayed
    pub fn delayed(
        delay: Duration,
        responder: impl Fn(&HttpRequest) -> Result<HttpResponse> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            responder: Box::new(responder),
            delay: Some(delay),
        })
    }

    /// Always answer 200 with `body`
    pub fn ok(body: &'static str) -> Arc<Self> {
        Self::new(move |_| Ok(HttpResponse::new(200, body)))
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Number of requests made with `token` as bearer
    pub fn calls_with_token(&self, token: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.bearer_token() == Some(token))
            .count()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        (self.responder)(&request)
    }
}

pub fn test_config() -> NotifyConfig {
    NotifyConfig::builder()
        .client_id("test-client")
        .client_secret("test-secret")
        .callback_url("https://example.com/callback")
        .build()
}

/// Route client logs to the test harness (`RUST_LOG` controls the level)
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn client_with(transport: Arc<MockTransport>) -> NotifyClient {
    init_tracing();
    NotifyClient::builder()
        .config(test_config())
        .shared_transport(transport)
        .build()
        .unwrap()
}

/// Parse a form body into key/value pairs (values left encoded)
pub fn form_pairs(body: &str) -> Vec<(String, String)> {
    body.split('&')
        .filter(|p| !p.is_empty())
        .filter_map(|p| p.split_once('='))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
