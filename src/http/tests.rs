//! Tests for the HTTP client module

use super::*;
use crate::auth::AuthConfig;
use crate::error::Error;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::time::{Duration, Instant};
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(10));
    assert!(config.rate_limit.is_none());
    assert!(config.user_agent.starts_with("category-feed/"));
}

#[test]
fn test_request_config_keeps_query_order() {
    let config = RequestConfig::new()
        .query("max_results", "10")
        .query("next_cursor", "abc");

    assert_eq!(
        config.query,
        vec![
            ("max_results".to_string(), "10".to_string()),
            ("next_cursor".to_string(), "abc".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_http_client_get_json_with_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/resources"))
        .and(query_param("max_results", "10"))
        .and(query_param_is_missing("next_cursor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "value": 42
        })))
        .mount(&mock_server)
        .await;

    let client = HttpClient::with_config(HttpClientConfig::default()).unwrap();

    let data: serde_json::Value = client
        .get_json(
            &format!("{}/resources", mock_server.uri()),
            RequestConfig::new().query("max_results", "10"),
        )
        .await
        .unwrap();

    assert_eq!(data["value"], 42);
}

#[tokio::test]
async fn test_http_client_applies_basic_auth() {
    let mock_server = MockServer::start().await;
    let expected = format!("Basic {}", STANDARD.encode("key:secret"));

    Mock::given(method("GET"))
        .and(path("/secure"))
        .and(header("Authorization", expected.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client =
        HttpClient::with_auth(HttpClientConfig::default(), AuthConfig::basic("key", "secret"))
            .unwrap();

    let _: serde_json::Value = client
        .get_json(&format!("{}/secure", mock_server.uri()), RequestConfig::new())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_http_client_status_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpClient::with_config(HttpClientConfig::default()).unwrap();

    let err = client
        .get_json::<serde_json::Value>(
            &format!("{}/flaky", mock_server.uri()),
            RequestConfig::new(),
        )
        .await
        .unwrap_err();
    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "unavailable");
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_http_client_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .timeout(Duration::from_millis(100))
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let err = client
        .get_json::<serde_json::Value>(
            &format!("{}/slow", mock_server.uri()),
            RequestConfig::new(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Timeout { timeout_ms: 100 }));
}

#[tokio::test]
async fn test_http_client_invalid_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = HttpClient::with_config(HttpClientConfig::default()).unwrap();
    let err = client
        .get_json::<serde_json::Value>(&mock_server.uri(), RequestConfig::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::JsonParse(_)));
}

#[tokio::test]
async fn test_http_client_rate_limit_spaces_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(2)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .rate_limit(RateLimiterConfig::new(1, 1))
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let start = Instant::now();
    for _ in 0..2 {
        let _: serde_json::Value = client
            .get_json(&mock_server.uri(), RequestConfig::new())
            .await
            .unwrap();
    }

    // Second call waits for the single token to refill
    assert!(start.elapsed() >= Duration::from_millis(500));
}
