//! HTTP client module
//!
//! Provides the HTTP client used for upstream calls.
//!
//! # Features
//!
//! - **Deadlines**: every request carries a timeout; expiry aborts the call
//! - **Rate Limiting**: optional token bucket rate limiter using governor
//! - **Authentication**: integration with the auth module
//! - **Status Classification**: non-success answers become typed errors
//!
//! There is no retry loop. A failed call surfaces immediately
//! and recovery is left to whoever triggers the next request.

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};

#[cfg(test)]
mod tests;
