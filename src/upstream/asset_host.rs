//! HTTP client for the asset host's resource listing endpoint

use super::types::{UpstreamListing, UpstreamProvider};
use crate::auth::AuthConfig;
use crate::config::{Credentials, UpstreamConfig};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use crate::types::Cursor;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Query parameter carrying the page size
const MAX_RESULTS_PARAM: &str = "max_results";

/// Query parameter carrying the continuation cursor
const CURSOR_PARAM: &str = "next_cursor";

/// Asset host listing `GET {base}/{cloud}/resources/image/upload`
#[derive(Debug, Clone)]
pub struct AssetHost {
    http: HttpClient,
    listing_url: Url,
}

impl AssetHost {
    /// Create a client for the given upstream and credentials
    pub fn new(config: &UpstreamConfig, credentials: &Credentials, timeout: Duration) -> Result<Self> {
        let listing_url = listing_url(&config.base_url, &credentials.cloud_name)?;

        let mut http_config = HttpClientConfig::builder().timeout(timeout);
        if let Some(rate_limit) = &config.rate_limit {
            http_config = http_config.rate_limit(rate_limit.clone());
        }

        let auth = AuthConfig::basic(&credentials.api_key, &credentials.api_secret);
        let http = HttpClient::with_auth(http_config.build(), auth)?;

        Ok(Self { http, listing_url })
    }

    /// The listing endpoint this client calls
    pub fn listing_url(&self) -> &Url {
        &self.listing_url
    }
}

#[async_trait]
impl UpstreamProvider for AssetHost {
    async fn list_resources(
        &self,
        max_results: u32,
        cursor: Option<&Cursor>,
    ) -> Result<UpstreamListing> {
        let mut request = RequestConfig::new().query(MAX_RESULTS_PARAM, max_results.to_string());
        if let Some(cursor) = cursor.filter(|c| c.is_usable()) {
            request = request.query(CURSOR_PARAM, cursor.as_str());
        }

        debug!(
            url = %self.listing_url,
            cursor = cursor.map(Cursor::as_str),
            "Listing upstream resources"
        );

        self.http
            .get_json(self.listing_url.as_str(), request)
            .await
    }
}

/// Build the listing URL, escaping the cloud name as a path segment
fn listing_url(base_url: &str, cloud_name: &str) -> Result<Url> {
    let mut url = Url::parse(base_url)?;
    url.path_segments_mut()
        .map_err(|()| Error::config(format!("Upstream base URL cannot be a base: {base_url}")))?
        .pop_if_empty()
        .push(cloud_name)
        .extend(["resources", "image", "upload"]);
    Ok(url)
}

#[cfg(test)]
mod url_tests {
    use super::listing_url;

    #[test]
    fn test_listing_url() {
        let url = listing_url("https://api.cloudinary.com/v1_1", "demo").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.cloudinary.com/v1_1/demo/resources/image/upload"
        );
    }

    #[test]
    fn test_listing_url_trailing_slash() {
        let url = listing_url("http://127.0.0.1:9000/", "demo").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/demo/resources/image/upload");
    }

    #[test]
    fn test_listing_url_rejects_non_base() {
        assert!(listing_url("mailto:someone@example.com", "demo").is_err());
    }
}
