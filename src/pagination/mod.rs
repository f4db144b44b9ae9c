//! Client-side pagination
//!
//! Accumulates the pages of one category into a deduplicated, append-only
//! list and decides when to ask for more.
//!
//! # Overview
//!
//! - [`PaginationState`] holds one session's items, cursor and flags
//! - [`FetchController`] owns the active session and serializes fetches
//! - [`ScrollTrigger`] turns scroll positions into fetch requests

mod controller;
mod trigger;
mod types;

pub use controller::{FetchController, FetchOutcome};
pub use trigger::{ScrollMetrics, ScrollTrigger, BOTTOM_THRESHOLD};
pub use types::{describe_failure, PaginationState, SessionSnapshot, SessionStatus, SkipReason};
