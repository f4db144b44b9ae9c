//! Pagination state for one category session
//!
//! `PaginationState` is a plain value: every transition is a method call and
//! none of them touch the network, so merges can be applied and checked in
//! isolation. The controller wraps it with locking and session tagging.

use crate::error::Error;
use crate::types::{Cursor, ImageItem, Page};
use std::collections::HashSet;

/// Why a fetch request was dropped instead of issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// A fetch for this session is already outstanding
    InFlight,
    /// The session has no further pages
    Exhausted,
    /// No category view is open
    NoSession,
}

/// Accumulated results and cursor bookkeeping for one session
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    accumulated: Vec<ImageItem>,
    seen_ids: HashSet<String>,
    cursor: Option<Cursor>,
    exhausted: bool,
    in_flight: bool,
    first_page_was_empty: bool,
    completed_pages: u64,
    error: Option<String>,
}

impl PaginationState {
    /// Initial state: no items, no cursor, more pages assumed
    pub fn new() -> Self {
        Self::default()
    }

    /// Items accumulated so far, in arrival order, unique by id
    pub fn items(&self) -> &[ImageItem] {
        &self.accumulated
    }

    /// Check whether an id has already been accumulated
    pub fn contains(&self, id: &str) -> bool {
        self.seen_ids.contains(id)
    }

    /// Cursor the next fetch will send
    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    /// Check if further pages may exist
    pub fn has_more(&self) -> bool {
        !self.exhausted
    }

    /// Check if the session reached its last page
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Check if a fetch is outstanding
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Check if the very first page came back with no items
    pub fn first_page_was_empty(&self) -> bool {
        self.first_page_was_empty
    }

    /// Number of pages merged successfully
    pub fn completed_pages(&self) -> u64 {
        self.completed_pages
    }

    /// Description of the last failed fetch, cleared when the next one starts
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Check whether a fetch may start now
    pub fn check_ready(&self) -> Result<(), SkipReason> {
        if self.in_flight {
            Err(SkipReason::InFlight)
        } else if self.exhausted {
            Err(SkipReason::Exhausted)
        } else {
            Ok(())
        }
    }

    /// Mark a fetch as started and return the cursor it should send
    pub fn begin_fetch(&mut self) -> Option<Cursor> {
        self.in_flight = true;
        self.error = None;
        self.cursor.clone()
    }

    /// Merge a successfully fetched page; returns how many items were new.
    ///
    /// Items whose id was already seen are dropped, so applying the same page
    /// twice leaves `items()` unchanged the second time. Exhaustion is sticky.
    pub fn apply_page(&mut self, page: Page) -> usize {
        let raw_len = page.items.len();
        let before = self.accumulated.len();

        for item in page.items {
            if self.seen_ids.insert(item.id.clone()) {
                self.accumulated.push(item);
            }
        }

        if raw_len == 0 && self.completed_pages == 0 {
            self.first_page_was_empty = true;
            self.exhausted = true;
        } else {
            self.exhausted |= page.next_cursor.is_none();
            self.cursor = page.next_cursor;
        }

        self.completed_pages += 1;
        self.accumulated.len() - before
    }

    /// Record a failed fetch without touching cursor or items
    pub fn record_failure(&mut self, description: impl Into<String>) {
        self.error = Some(description.into());
    }

    /// Mark the outstanding fetch as finished
    pub fn finish_fetch(&mut self) {
        self.in_flight = false;
    }
}

/// Human-readable description of a fetch failure
pub fn describe_failure(err: &Error) -> String {
    match err {
        Error::Proxy { status, .. } | Error::HttpStatus { status, .. } => {
            format!("Failed to fetch images (status {status}).")
        }
        Error::Timeout { .. } => "Timed out while fetching images.".to_string(),
        Error::MissingConfigField { .. } | Error::Config { .. } => {
            "Image service is not configured.".to_string()
        }
        _ => "An error occurred while fetching images.".to_string(),
    }
}

/// Read-only view of a session, as handed to presentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Category this session loads
    pub category: String,
    /// Accumulated items
    pub items: Vec<ImageItem>,
    /// More pages may exist
    pub has_more: bool,
    /// A fetch is outstanding
    pub loading: bool,
    /// Last failure, if the most recent fetch failed
    pub error: Option<String>,
    /// The category turned out to have nothing on its first page
    pub first_page_was_empty: bool,
    /// Pages merged so far
    pub completed_pages: u64,
}

impl SessionSnapshot {
    pub(crate) fn new(category: &str, state: &PaginationState) -> Self {
        Self {
            category: category.to_string(),
            items: state.items().to_vec(),
            has_more: state.has_more(),
            loading: state.is_in_flight(),
            error: state.error().map(str::to_string),
            first_page_was_empty: state.first_page_was_empty(),
            completed_pages: state.completed_pages(),
        }
    }
}

/// The gating flags a trigger needs, without copying items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStatus {
    /// More pages may exist
    pub has_more: bool,
    /// A fetch is outstanding
    pub loading: bool,
    /// Pages merged so far
    pub completed_pages: u64,
}

impl From<&PaginationState> for SessionStatus {
    fn from(state: &PaginationState) -> Self {
        Self {
            has_more: state.has_more(),
            loading: state.is_in_flight(),
            completed_pages: state.completed_pages(),
        }
    }
}
