//! Pagination proxy
//!
//! Translates `(category, cursor)` requests into upstream listing calls,
//! keeps only the resources filed under the category, and returns a
//! normalized [`Page`](crate::types::Page).
//!
//! # Overview
//!
//! - [`PaginationProxy`] runs server-side against an [`UpstreamProvider`](crate::upstream::UpstreamProvider)
//! - [`ProxyClient`] talks to a running proxy over HTTP
//! - Both implement [`PageSource`], which is all the fetch controller needs

mod client;
mod service;
mod types;

pub use client::ProxyClient;
pub use service::{filter_category, PaginationProxy};
pub use types::PageSource;
