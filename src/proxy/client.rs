//! HTTP client for a running pagination proxy

use super::types::PageSource;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use crate::types::{Cursor, Page};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Client-side deadline; longer than the proxy's own upstream deadline so
/// the proxy's timeout answer arrives before ours fires
const CLIENT_TIMEOUT: Duration = Duration::from_secs(15);

/// Failure body returned by the proxy
#[derive(Debug, Deserialize)]
struct FailureBody {
    message: String,
}

/// Fetches pages from `GET {base}/resources/{category}?next_cursor=...`
#[derive(Debug, Clone)]
pub struct ProxyClient {
    http: HttpClient,
    base_url: Url,
}

impl ProxyClient {
    /// Create a client for the proxy at `base_url`
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::config(format!("Proxy URL cannot be a base: {base_url}")));
        }
        let config = HttpClientConfig::builder().timeout(CLIENT_TIMEOUT).build();
        let http = HttpClient::with_config(config)?;
        Ok(Self { http, base_url })
    }

    /// URL of the resources endpoint for `category`, with the category escaped
    pub fn resources_url(&self, category: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("resources").push(category);
        }
        url
    }
}

#[async_trait]
impl PageSource for ProxyClient {
    async fn fetch_page(&self, category: &str, cursor: Option<&Cursor>) -> Result<Page> {
        let url = self.resources_url(category);
        let cursor = cursor.map(Cursor::as_str).unwrap_or_default();
        debug!(%url, cursor, "Requesting page from proxy");

        let request = RequestConfig::new().query("next_cursor", cursor);
        match self
            .http
            .get_json::<Page>(url.as_str(), request)
            .await
        {
            Ok(page) => Ok(page),
            Err(Error::HttpStatus { status, body }) => {
                let message = serde_json::from_str::<FailureBody>(&body)
                    .map(|b| b.message)
                    .unwrap_or(body);
                Err(Error::proxy(status, message))
            }
            Err(e) => Err(e),
        }
    }
}
