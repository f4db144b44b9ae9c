//! Upstream wire types and the provider trait

use crate::error::Result;
use crate::types::{Cursor, ImageItem};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A raw resource as listed by the upstream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamResource {
    /// Upstream identifier
    pub public_id: String,
    /// HTTPS delivery URL
    #[serde(default)]
    pub secure_url: String,
    /// Folder the asset was filed under; this is the category
    #[serde(default)]
    pub asset_folder: Option<String>,
}

impl UpstreamResource {
    /// Check whether this resource belongs to `category` (exact, case-sensitive)
    pub fn in_category(&self, category: &str) -> bool {
        self.asset_folder.as_deref() == Some(category)
    }

    /// Project onto the public item shape
    pub fn to_item(&self) -> ImageItem {
        ImageItem::new(&self.public_id, &self.secure_url)
    }
}

/// One page of an upstream listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamListing {
    /// Resources in upstream order
    #[serde(default)]
    pub resources: Vec<UpstreamResource>,
    /// Raw continuation token
    #[serde(default)]
    pub next_cursor: Option<String>,
}

impl UpstreamListing {
    /// Create a listing
    pub fn new(resources: Vec<UpstreamResource>, next_cursor: Option<&str>) -> Self {
        Self {
            resources,
            next_cursor: next_cursor.map(str::to_string),
        }
    }

    /// Continuation cursor, with an empty token treated as the end
    pub fn next_cursor(&self) -> Option<Cursor> {
        self.next_cursor
            .as_deref()
            .filter(|c| !c.is_empty())
            .map(Cursor::new)
    }
}

/// A paginated source of image resources
#[async_trait]
pub trait UpstreamProvider: Send + Sync {
    /// Fetch one page of at most `max_results` resources.
    ///
    /// `cursor` is sent only when present; it is passed through untouched.
    async fn list_resources(
        &self,
        max_results: u32,
        cursor: Option<&Cursor>,
    ) -> Result<UpstreamListing>;
}
