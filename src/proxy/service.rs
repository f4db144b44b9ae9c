//! Server-side pagination proxy

use super::types::PageSource;
use crate::config::{ProxyConfig, PAGE_SIZE};
use crate::error::{Error, Result};
use crate::types::{Cursor, ImageItem, Page};
use crate::upstream::{AssetHost, UpstreamProvider, UpstreamResource};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Where upstream calls go, or why they cannot be made
#[derive(Clone)]
enum Upstream {
    Ready(Arc<dyn UpstreamProvider>),
    Misconfigured { field: String },
}

/// Stateless proxy between clients and the upstream listing
#[derive(Clone)]
pub struct PaginationProxy {
    upstream: Upstream,
    timeout: Duration,
}

impl PaginationProxy {
    /// Build a proxy from configuration.
    ///
    /// Missing credentials do not fail here: the proxy is built in a
    /// misconfigured state and rejects every request before calling out.
    pub fn from_config(config: &ProxyConfig) -> Result<Self> {
        config.validate()?;
        let upstream = match config.upstream.credentials() {
            Ok(credentials) => {
                let host = AssetHost::new(&config.upstream, &credentials, config.timeout())?;
                Upstream::Ready(Arc::new(host))
            }
            Err(Error::MissingConfigField { field }) => {
                warn!("Upstream credentials incomplete, missing {field}; requests will fail");
                Upstream::Misconfigured { field }
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            upstream,
            timeout: config.timeout(),
        })
    }

    /// Build a proxy over an explicit provider
    pub fn with_provider(provider: Arc<dyn UpstreamProvider>, timeout: Duration) -> Self {
        Self {
            upstream: Upstream::Ready(provider),
            timeout,
        }
    }

    /// Build a proxy that rejects every request as misconfigured
    pub fn misconfigured(field: impl Into<String>) -> Self {
        Self {
            upstream: Upstream::Misconfigured {
                field: field.into(),
            },
            timeout: Duration::from_secs(crate::config::DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Check whether upstream calls can be made
    pub fn is_configured(&self) -> bool {
        matches!(self.upstream, Upstream::Ready(_))
    }

    /// Upstream call deadline
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch one page of `category`.
    ///
    /// The upstream's cursor is returned verbatim however many resources
    /// survived the category filter, so a page may be empty yet continue.
    pub async fn fetch_page(&self, category: &str, cursor: Option<&Cursor>) -> Result<Page> {
        let provider = match &self.upstream {
            Upstream::Ready(provider) => provider,
            Upstream::Misconfigured { field } => {
                error!("Upstream credentials are missing ({field})");
                return Err(Error::missing_field(field.clone()));
            }
        };

        let cursor = cursor.filter(|c| c.is_usable());
        let call = provider.list_resources(PAGE_SIZE, cursor);

        let listing = match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(listing)) => listing,
            Ok(Err(e)) => {
                error!(category, "Upstream listing failed: {e}");
                return Err(e);
            }
            Err(_) => {
                error!(category, "Upstream listing timed out after {:?}", self.timeout);
                return Err(Error::Timeout {
                    timeout_ms: self.timeout.as_millis() as u64,
                });
            }
        };

        let items = filter_category(&listing.resources, category);
        let next_cursor = listing.next_cursor();
        debug!(
            category,
            raw = listing.resources.len(),
            kept = items.len(),
            has_next = next_cursor.is_some(),
            "Served page"
        );

        Ok(Page::new(items, next_cursor))
    }
}

#[async_trait]
impl PageSource for PaginationProxy {
    async fn fetch_page(&self, category: &str, cursor: Option<&Cursor>) -> Result<Page> {
        PaginationProxy::fetch_page(self, category, cursor).await
    }
}

impl std::fmt::Debug for PaginationProxy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginationProxy")
            .field("configured", &self.is_configured())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Keep resources filed exactly under `category`, in upstream order
pub fn filter_category(resources: &[UpstreamResource], category: &str) -> Vec<ImageItem> {
    resources
        .iter()
        .filter(|r| r.in_category(category))
        .map(UpstreamResource::to_item)
        .collect()
}
