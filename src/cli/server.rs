//! HTTP server mode exposing the pagination proxy

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ProxyConfig;
use crate::error::{Error, Result, ResultExt};
use crate::proxy::PaginationProxy;
use crate::types::Cursor;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Proxy configuration
    pub proxy: ProxyConfig,
    /// Port to listen on
    pub port: u16,
}

/// App state shared across handlers
#[derive(Debug, Clone)]
struct AppState {
    proxy: PaginationProxy,
}

/// Query string of the resources endpoint
#[derive(Debug, Deserialize)]
struct ResourcesQuery {
    /// Empty or `"null"` means the first page
    #[serde(default)]
    next_cursor: Option<String>,
}

/// Failure body
#[derive(Debug, Serialize)]
struct FailureBody {
    message: &'static str,
}

/// Build the proxy router
pub fn router(proxy: PaginationProxy) -> Router {
    let state = AppState { proxy };

    // Build CORS layer - allow all origins for development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/resources/:category", get(list_resources))
        .route("/api/getImagesByCategory/:category", get(list_resources))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Start the HTTP server
pub async fn serve(config: ServerConfig) -> Result<()> {
    let proxy = PaginationProxy::from_config(&config.proxy)?;
    let app = router(proxy);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting HTTP server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to port {}", config.port))?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "upstream_configured": state.proxy.is_configured()
    }))
}

/// One page of a category
async fn list_resources(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
    Query(query): Query<ResourcesQuery>,
) -> Response {
    let cursor = Cursor::from_param(query.next_cursor.as_deref());

    match state.proxy.fetch_page(&category, cursor.as_ref()).await {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => failure_response(&e),
    }
}

/// Map a proxy error to `{message}` with the matching status
fn failure_response(err: &Error) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(FailureBody {
            message: err.public_message(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::{UpstreamListing, UpstreamProvider, UpstreamResource};
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use std::sync::Mutex;
    use std::time::Duration;
    use tower::ServiceExt;

    /// Provider answering every call with one listing, recording cursors
    struct StubProvider {
        listing: UpstreamListing,
        cursors: Arc<Mutex<Vec<Option<String>>>>,
    }

    #[async_trait]
    impl UpstreamProvider for StubProvider {
        async fn list_resources(
            &self,
            _max_results: u32,
            cursor: Option<&Cursor>,
        ) -> Result<UpstreamListing> {
            self.cursors
                .lock()
                .unwrap()
                .push(cursor.map(|c| c.as_str().to_string()));
            Ok(self.listing.clone())
        }
    }

    fn stub_router(listing: UpstreamListing) -> (Router, Arc<Mutex<Vec<Option<String>>>>) {
        let cursors = Arc::new(Mutex::new(Vec::new()));
        let provider = StubProvider {
            listing,
            cursors: cursors.clone(),
        };
        let proxy = PaginationProxy::with_provider(Arc::new(provider), Duration::from_secs(10));
        (router(proxy), cursors)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn listing() -> UpstreamListing {
        UpstreamListing::new(
            vec![
                UpstreamResource {
                    public_id: "x1".to_string(),
                    secure_url: "https://cdn/x1".to_string(),
                    asset_folder: Some("wedding rings".to_string()),
                },
                UpstreamResource {
                    public_id: "y1".to_string(),
                    secure_url: "https://cdn/y1".to_string(),
                    asset_folder: Some("other".to_string()),
                },
            ],
            Some("c1"),
        )
    }

    #[tokio::test]
    async fn test_resources_first_page() {
        let (app, cursors) = stub_router(listing());

        let (status, body) = get_json(app, "/resources/wedding%20rings?next_cursor=").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "images": [{"public_id": "x1", "secure_url": "https://cdn/x1"}],
                "next_cursor": "c1"
            })
        );
        assert_eq!(*cursors.lock().unwrap(), vec![None]);
    }

    #[tokio::test]
    async fn test_resources_null_cursor_means_first_page() {
        let (app, cursors) = stub_router(listing());

        let (status, _) = get_json(app, "/resources/other?next_cursor=null").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(*cursors.lock().unwrap(), vec![None]);
    }

    #[tokio::test]
    async fn test_resources_forwards_cursor() {
        let (app, cursors) = stub_router(UpstreamListing::default());

        let (status, body) = get_json(app, "/resources/other?next_cursor=abc%2B1").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"images": [], "next_cursor": null}));
        assert_eq!(*cursors.lock().unwrap(), vec![Some("abc+1".to_string())]);
    }

    #[tokio::test]
    async fn test_legacy_route() {
        let (app, _) = stub_router(listing());

        let (status, body) = get_json(app, "/api/getImagesByCategory/other").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["images"][0]["public_id"], "y1");
    }

    #[tokio::test]
    async fn test_misconfigured_returns_500() {
        let app = router(PaginationProxy::misconfigured("api_secret"));

        let (status, body) = get_json(app, "/resources/rings").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"message": "Server misconfiguration"}));
    }

    #[tokio::test]
    async fn test_health() {
        let app = router(PaginationProxy::misconfigured("cloud_name"));

        let (status, body) = get_json(app, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok", "upstream_configured": false}));
    }

    #[test]
    fn test_failure_response_status() {
        assert_eq!(
            failure_response(&Error::http_status(429, "")).status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            failure_response(&Error::Timeout { timeout_ms: 1 }).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
