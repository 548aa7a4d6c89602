//! Integration tests for the authorization flow: URL building, code
//! exchange, identity lookup, and the composed `authorize`

mod common;

use common::{MockTransport, client_with, form_pairs};
use line_notify_client::client::{STATUS_URL, TOKEN_URL};
use line_notify_client::{
    AccessToken, AuthorizationCode, HttpMethod, HttpResponse, NotifyError, REQUEST_TIMEOUT,
    UserProfile,
};

// ============================================================================
// Authorization URL
// ============================================================================

#[test]
fn test_authorization_url_makes_no_requests() {
    let transport = MockTransport::ok("{}");
    let client = client_with(transport.clone());

    let first = client.authorization_url();
    let second = client.authorization_url();

    assert_eq!(first, second);
    assert!(first.contains("response_type=code"));
    assert!(first.contains("client_id=test-client"));
    assert!(first.contains("redirect_uri=https%3A%2F%2Fexample.com%2Fcallback"));
    assert!(first.contains("scope=notify"));
    assert!(first.contains("state=NO_STATE"));
    assert_eq!(transport.call_count(), 0);
}

// ============================================================================
// Code Exchange
// ============================================================================

#[tokio::test]
async fn test_exchange_empty_code_skips_network() {
    let transport = MockTransport::ok(r#"{"access_token":"T1"}"#);
    let client = client_with(transport.clone());

    let token = client.exchange_code(&AuthorizationCode::new("")).await.unwrap();

    assert!(token.is_none());
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_exchange_returns_access_token() {
    let transport = MockTransport::ok(r#"{"status":200,"message":"access_token is issued","access_token":"T1"}"#);
    let client = client_with(transport.clone());

    let token = client.exchange_code(&AuthorizationCode::new("abc")).await.unwrap();
    assert_eq!(token, Some(AccessToken::new("T1")));

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.url, TOKEN_URL);
    assert_eq!(request.timeout, REQUEST_TIMEOUT);
    assert!(request.bearer_token().is_none());
    assert_eq!(
        request.header_value("Content-Type"),
        Some("application/x-www-form-urlencoded")
    );

    let form = form_pairs(request.body.as_deref().unwrap());
    let expected = [
        ("grant_type", "authorization_code"),
        ("code", "abc"),
        ("redirect_uri", "https%3A%2F%2Fexample.com%2Fcallback"),
        ("client_id", "test-client"),
        ("client_secret", "test-secret"),
    ];
    assert_eq!(form.len(), expected.len());
    for (k, v) in expected {
        assert!(
            form.iter().any(|(fk, fv)| fk == k && fv == v),
            "missing form field {k}={v}"
        );
    }
}

#[tokio::test]
async fn test_exchange_missing_field_is_none() {
    let client = client_with(MockTransport::ok(r#"{"status":200}"#));

    let token = client.exchange_code(&AuthorizationCode::new("abc")).await.unwrap();

    assert!(token.is_none());
}

#[tokio::test]
async fn test_exchange_empty_body_is_none() {
    let transport = MockTransport::ok("");
    let client = client_with(transport.clone());

    let token = client.exchange_code(&AuthorizationCode::new("abc")).await.unwrap();

    assert!(token.is_none());
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test]
async fn test_exchange_non_success_is_remote_error() {
    let transport = MockTransport::new(|_| {
        Ok(HttpResponse::new(400, r#"{"status":400,"message":"Invalid code"}"#))
    });
    let client = client_with(transport);

    let err = client
        .exchange_code(&AuthorizationCode::new("stale"))
        .await
        .unwrap_err();

    assert!(err.is_remote());
    assert_eq!(err.status(), Some(400));
    assert!(err.to_string().contains("400"));
}

#[tokio::test]
async fn test_exchange_malformed_body_is_json_error() {
    let client = client_with(MockTransport::ok("<html>oops</html>"));

    let err = client
        .exchange_code(&AuthorizationCode::new("abc"))
        .await
        .unwrap_err();

    assert!(matches!(err, NotifyError::Json(_)));
}

#[tokio::test]
async fn test_exchange_timeout_propagates() {
    let transport = MockTransport::new(|req| Err(NotifyError::timeout(req.url.clone(), 60)));
    let client = client_with(transport);

    let err = client
        .exchange_code(&AuthorizationCode::new("abc"))
        .await
        .unwrap_err();

    assert!(err.is_remote());
    assert!(matches!(err, NotifyError::Timeout { timeout_secs: 60, .. }));
}

// ============================================================================
// Identity Resolution
// ============================================================================

#[tokio::test]
async fn test_resolve_identity_returns_target() {
    let transport = MockTransport::ok(r#"{"status":200,"message":"ok","targetType":"USER","target":"Alice"}"#);
    let client = client_with(transport.clone());

    let name = client.resolve_identity(&AccessToken::new("T1")).await.unwrap();
    assert_eq!(name.as_deref(), Some("Alice"));

    let request = &transport.requests()[0];
    assert_eq!(request.method, HttpMethod::Get);
    assert_eq!(request.url, STATUS_URL);
    assert_eq!(request.bearer_token(), Some("T1"));
    assert!(request.body.is_none());
}

#[tokio::test]
async fn test_resolve_identity_non_success_is_none() {
    for status in [400, 401, 500] {
        let client = client_with(MockTransport::new(move |_| {
            Ok(HttpResponse::new(status, r#"{"status":401,"message":"Invalid access token"}"#))
        }));

        let name = client.resolve_identity(&AccessToken::new("revoked")).await;

        assert!(matches!(name, Ok(None)), "status {status} should yield None");
    }
}

#[tokio::test]
async fn test_resolve_identity_empty_token_skips_network() {
    let transport = MockTransport::ok(r#"{"target":"Alice"}"#);
    let client = client_with(transport.clone());

    let name = client.resolve_identity(&AccessToken::new("")).await.unwrap();

    assert!(name.is_none());
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_resolve_identity_transport_failure_propagates() {
    let client = client_with(MockTransport::new(|_| Err(NotifyError::http("connection refused"))));

    let err = client
        .resolve_identity(&AccessToken::new("T1"))
        .await
        .unwrap_err();

    assert!(matches!(err, NotifyError::Http(_)));
}

// ============================================================================
// Authorize (exchange + identity)
// ============================================================================

#[tokio::test]
async fn test_authorize_round_trip() {
    let transport = MockTransport::new(|req| {
        if req.url == TOKEN_URL {
            Ok(HttpResponse::new(200, r#"{"access_token":"T1"}"#))
        } else if req.url == STATUS_URL && req.bearer_token() == Some("T1") {
            Ok(HttpResponse::new(200, r#"{"target":"Alice"}"#))
        } else {
            Ok(HttpResponse::new(404, "unexpected"))
        }
    });
    let client = client_with(transport.clone());

    let profile = client.authorize(&AuthorizationCode::new("abc")).await.unwrap();

    assert_eq!(
        profile,
        UserProfile {
            token: Some(AccessToken::new("T1")),
            name: Some("Alice".to_string()),
        }
    );
    let urls: Vec<String> = transport.requests().into_iter().map(|r| r.url).collect();
    assert_eq!(urls, vec![TOKEN_URL.to_string(), STATUS_URL.to_string()]);
}

#[tokio::test]
async fn test_authorize_keeps_token_when_identity_rejected() {
    let transport = MockTransport::new(|req| {
        if req.url == TOKEN_URL {
            Ok(HttpResponse::new(200, r#"{"access_token":"T1"}"#))
        } else {
            Ok(HttpResponse::new(401, "Invalid access token"))
        }
    });
    let client = client_with(transport);

    let profile = client.authorize(&AuthorizationCode::new("abc")).await.unwrap();

    assert_eq!(profile.token, Some(AccessToken::new("T1")));
    assert!(profile.name.is_none());
}

#[tokio::test]
async fn test_authorize_empty_code_yields_empty_profile() {
    let transport = MockTransport::ok(r#"{"access_token":"T1"}"#);
    let client = client_with(transport.clone());

    let profile = client.authorize(&AuthorizationCode::new("")).await.unwrap();

    assert_eq!(profile, UserProfile::default());
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_authorize_exchange_failure_skips_identity() {
    let transport = MockTransport::new(|_| Ok(HttpResponse::new(400, "bad code")));
    let client = client_with(transport.clone());

    let err = client.authorize(&AuthorizationCode::new("abc")).await.unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(transport.call_count(), 1);
}
