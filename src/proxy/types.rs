//! Page source abstraction

use crate::error::Result;
use crate::types::{Cursor, Page};
use async_trait::async_trait;

/// Anything that can produce one page of a category
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the page following `cursor`, or the first page when `None`
    async fn fetch_page(&self, category: &str, cursor: Option<&Cursor>) -> Result<Page>;
}
