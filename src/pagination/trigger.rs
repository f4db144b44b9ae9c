//! Scroll trigger
//!
//! Turns viewport scroll positions into `continue_fetch` calls. The trigger
//! only decides *whether* to ask; the controller's in-flight guard is what
//! prevents duplicate requests under rapid repeated events.

use super::controller::{FetchController, FetchOutcome};
use futures::{Stream, StreamExt};
use tokio::task::JoinSet;
use tracing::trace;

/// Distance from the bottom of the content, in the same units as the
/// metrics, within which the next page is requested
pub const BOTTOM_THRESHOLD: f64 = 100.0;

/// Viewport scroll position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    /// Offset of the top of the viewport into the content
    pub scroll_offset: f64,
    /// Height of the visible viewport
    pub viewport_height: f64,
    /// Total content height
    pub content_height: f64,
}

impl ScrollMetrics {
    /// Create scroll metrics
    pub fn new(scroll_offset: f64, viewport_height: f64, content_height: f64) -> Self {
        Self {
            scroll_offset,
            viewport_height,
            content_height,
        }
    }

    /// Distance from the bottom of the viewport to the end of the content
    pub fn distance_to_bottom(&self) -> f64 {
        self.content_height - (self.scroll_offset + self.viewport_height)
    }

    /// Check if the viewport is within `threshold` of the end
    pub fn is_near_bottom(&self, threshold: f64) -> bool {
        self.distance_to_bottom() <= threshold
    }
}

/// Requests the next page when the user scrolls near the bottom
#[derive(Debug, Clone)]
pub struct ScrollTrigger {
    controller: FetchController,
    threshold: f64,
}

impl ScrollTrigger {
    /// Create a trigger with the default threshold
    pub fn new(controller: FetchController) -> Self {
        Self {
            controller,
            threshold: BOTTOM_THRESHOLD,
        }
    }

    /// Use a different bottom threshold
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Check whether a scroll event at `metrics` should request a page.
    ///
    /// Requires the viewport near the bottom, more pages, no outstanding
    /// fetch, and at least one page already shown.
    pub fn should_fire(&self, metrics: ScrollMetrics) -> bool {
        if !metrics.is_near_bottom(self.threshold) {
            return false;
        }
        self.controller
            .status()
            .is_some_and(|s| s.has_more && !s.loading && s.completed_pages > 0)
    }

    /// Handle one scroll event, fetching if it qualifies
    pub async fn on_scroll(&self, metrics: ScrollMetrics) -> Option<FetchOutcome> {
        if !self.should_fire(metrics) {
            trace!(distance = metrics.distance_to_bottom(), "Scroll ignored");
            return None;
        }
        Some(self.controller.continue_fetch().await)
    }

    /// Consume a stream of scroll events until it ends.
    ///
    /// Qualifying events start a fetch without blocking the stream, so events
    /// arriving while it is outstanding hit the controller's guard and are
    /// dropped. Returns the outcomes of the fetches that were started.
    pub async fn run<S>(&self, events: S) -> Vec<FetchOutcome>
    where
        S: Stream<Item = ScrollMetrics> + Unpin,
    {
        let mut events = events;
        let mut fetches = JoinSet::new();

        while let Some(metrics) = events.next().await {
            if self.should_fire(metrics) {
                let controller = self.controller.clone();
                fetches.spawn(async move { controller.continue_fetch().await });
            }
        }

        let mut outcomes = Vec::new();
        while let Some(joined) = fetches.join_next().await {
            if let Ok(outcome) = joined {
                outcomes.push(outcome);
            }
        }
        outcomes
    }
}
