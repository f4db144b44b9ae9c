//! Tests for the upstream provider

use super::*;
use crate::config::{Credentials, UpstreamConfig};
use crate::error::Error;
use crate::types::Cursor;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LISTING_PATH: &str = "/demo/resources/image/upload";

fn credentials() -> Credentials {
    Credentials::new("demo", "key", "secret")
}

fn host_for(server: &MockServer) -> AssetHost {
    let config = UpstreamConfig::with_base_url(server.uri());
    AssetHost::new(&config, &credentials(), Duration::from_secs(10)).unwrap()
}

// ============================================================================
// Wire type Tests
// ============================================================================

#[test]
fn test_listing_deserialize() {
    let listing: UpstreamListing = serde_json::from_value(json!({
        "resources": [
            {
                "public_id": "rings/r1",
                "secure_url": "https://cdn/r1.jpg",
                "asset_folder": "rings",
                "format": "jpg",
                "bytes": 1024
            },
            {"public_id": "loose", "secure_url": "https://cdn/loose.jpg"}
        ],
        "next_cursor": "c1"
    }))
    .unwrap();

    assert_eq!(listing.resources.len(), 2);
    assert!(listing.resources[0].in_category("rings"));
    assert!(!listing.resources[1].in_category("rings"));
    assert_eq!(listing.next_cursor(), Some(Cursor::new("c1")));
}

#[test]
fn test_listing_empty_cursor_means_end() {
    let listing: UpstreamListing =
        serde_json::from_value(json!({"resources": [], "next_cursor": ""})).unwrap();
    assert_eq!(listing.next_cursor(), None);

    let listing: UpstreamListing = serde_json::from_value(json!({"resources": []})).unwrap();
    assert_eq!(listing.next_cursor(), None);
}

#[test]
fn test_category_match_is_exact() {
    let resource = UpstreamResource {
        public_id: "p".to_string(),
        secure_url: "u".to_string(),
        asset_folder: Some("Rings".to_string()),
    };
    assert!(resource.in_category("Rings"));
    assert!(!resource.in_category("rings"));
    assert!(!resource.in_category("Rings "));
}

// ============================================================================
// AssetHost Tests
// ============================================================================

#[tokio::test]
async fn test_asset_host_first_page_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .and(query_param("max_results", "10"))
        .and(query_param_is_missing("next_cursor"))
        .and(header("Authorization", "Basic a2V5OnNlY3JldA=="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resources": [
                {"public_id": "x1", "secure_url": "https://cdn/x1", "asset_folder": "rings"}
            ],
            "next_cursor": "c1"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let listing = host_for(&mock_server).list_resources(10, None).await.unwrap();

    assert_eq!(listing.resources[0].public_id, "x1");
    assert_eq!(listing.next_cursor(), Some(Cursor::new("c1")));
}

#[tokio::test]
async fn test_asset_host_passes_cursor_verbatim() {
    let mock_server = MockServer::start().await;
    let opaque = "b1f0+e/9a==&x";

    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .and(query_param("next_cursor", opaque))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"resources": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let cursor = Cursor::new(opaque);
    host_for(&mock_server)
        .list_resources(10, Some(&cursor))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_asset_host_drops_null_placeholder_cursor() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .and(query_param_is_missing("next_cursor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"resources": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let cursor = Cursor::new("null");
    host_for(&mock_server)
        .list_resources(10, Some(&cursor))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_asset_host_status_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(420).set_body_string("Rate Limit Exceeded"))
        .mount(&mock_server)
        .await;

    let err = host_for(&mock_server)
        .list_resources(10, None)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 420, .. }));
}

#[test]
fn test_asset_host_listing_url() {
    let config = UpstreamConfig::default();
    let host = AssetHost::new(&config, &credentials(), Duration::from_secs(10)).unwrap();
    assert_eq!(
        host.listing_url().as_str(),
        "https://api.cloudinary.com/v1_1/demo/resources/image/upload"
    );
}
