//! # category-feed
//!
//! Progressive loading of one category's images from a cursor-paginated
//! asset host.
//!
//! ## Features
//!
//! - **Pagination Proxy**: translates an opaque cursor into upstream listing
//!   calls, filters by category, and returns `{images, next_cursor}`
//! - **Fetch Controller**: accumulates pages per category session with
//!   idempotent dedup, single-flight fetching and end-of-data detection
//! - **Scroll Trigger**: requests the next page when the viewport nears the end
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use category_feed::pagination::FetchController;
//! use category_feed::proxy::ProxyClient;
//!
//! #[tokio::main]
//! async fn main() -> category_feed::Result<()> {
//!     let client = ProxyClient::new("http://localhost:8080")?;
//!     let controller = FetchController::new(Arc::new(client));
//!
//!     controller.open("rings");
//!     while controller.has_more() {
//!         controller.continue_fetch().await;
//!     }
//!
//!     let snapshot = controller.snapshot().unwrap();
//!     println!("{} images", snapshot.items.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌─────────────────┐   ┌──────────────────┐   ┌────────────┐
//! │ScrollTrigger │──▶│ FetchController │──▶│ PaginationProxy  │──▶│ AssetHost  │
//! │ near bottom? │   │ dedup, guard,   │   │ filter category, │   │ Basic auth │
//! │              │   │ session tagging │   │ 10s deadline     │   │ cursor     │
//! └──────────────┘   └─────────────────┘   └──────────────────┘   └────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Images, pages and cursors
pub mod types;

/// Proxy configuration
pub mod config;

/// Upstream authentication
pub mod auth;

/// HTTP client with deadlines and rate limiting
pub mod http;

/// Upstream resource provider
pub mod upstream;

/// Server-side pagination proxy and its HTTP client
pub mod proxy;

/// Client-side pagination: state, controller and scroll trigger
pub mod pagination;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
