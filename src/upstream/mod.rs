//! Upstream resource provider
//!
//! The asset host is an opaque paginated store: each call returns one page
//! of raw resources and, when more exist, a continuation cursor. Everything
//! about its storage and auth beyond that is out of our hands.
//!
//! [`UpstreamProvider`] is the seam the proxy depends on; [`AssetHost`] is the
//! HTTP implementation.

mod asset_host;
mod types;

pub use asset_host::AssetHost;
pub use types::{UpstreamListing, UpstreamProvider, UpstreamResource};

#[cfg(test)]
mod tests;
