//! Common types used throughout category-feed
//!
//! The data model shared by the proxy, the upstream provider and the
//! fetch controller: images, pages and the opaque continuation cursor.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Cursor
// ============================================================================

/// Opaque continuation token issued by the upstream provider.
///
/// Never parsed or constructed locally; the wrapped string travels back to the
/// upstream exactly as it was received.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

/// Placeholder some clients send when they serialize a missing cursor.
const NULL_PLACEHOLDER: &str = "null";

impl Cursor {
    /// Wrap a raw token
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Normalize an optional raw value into a usable cursor.
    ///
    /// Missing, empty and the literal `"null"` all mean "first page".
    pub fn from_param(raw: Option<&str>) -> Option<Self> {
        raw.filter(|s| Self::is_usable_token(s))
            .map(|s| Self(s.to_string()))
    }

    /// Check whether this cursor may be sent upstream
    pub fn is_usable(&self) -> bool {
        Self::is_usable_token(&self.0)
    }

    fn is_usable_token(token: &str) -> bool {
        !token.is_empty() && token != NULL_PLACEHOLDER
    }

    /// The raw token
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the raw token
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Cursor {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for Cursor {
    fn from(token: String) -> Self {
        Self(token)
    }
}

// ============================================================================
// Images and Pages
// ============================================================================

/// A single image, identified by its upstream id.
///
/// Serialized with the upstream's public field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageItem {
    /// Stable identifier, unique within the upstream
    #[serde(rename = "public_id")]
    pub id: String,
    /// Fetchable location of the image
    #[serde(rename = "secure_url")]
    pub url: String,
}

impl ImageItem {
    /// Create a new image item
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
        }
    }
}

/// One page of category images as returned by the proxy.
///
/// Wire shape: `{"images": [...], "next_cursor": "..." | null}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Images in upstream order
    #[serde(rename = "images", default)]
    pub items: Vec<ImageItem>,
    /// Cursor for the following page, absent when this was the last one
    #[serde(default)]
    pub next_cursor: Option<Cursor>,
}

impl Page {
    /// Create a page
    pub fn new(items: Vec<ImageItem>, next_cursor: Option<Cursor>) -> Self {
        Self { items, next_cursor }
    }

    /// A page with no items and no continuation
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if the page carries no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Check if another page follows
    pub fn has_next(&self) -> bool {
        self.next_cursor.is_some()
    }
}
