//! Fetch controller
//!
//! Owns the active category session and serializes fetches for it. A fetch
//! request that arrives while another is outstanding, or after the session is
//! exhausted, is dropped rather than queued; the next trigger event retries.
//!
//! Every fetch is tagged with the id of the session it was issued for. If the
//! category changed while the request was outstanding, the response is
//! discarded instead of being merged into the new session.

use super::types::{
    describe_failure, PaginationState, SessionSnapshot, SessionStatus, SkipReason,
};
use crate::error::Error;
use crate::proxy::PageSource;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Result of one `continue_fetch` call
#[derive(Debug)]
pub enum FetchOutcome {
    /// No request was issued
    Skipped(SkipReason),
    /// A page was merged
    Fetched {
        /// Items not seen before
        new_items: usize,
        /// Session is now exhausted
        exhausted: bool,
    },
    /// The request failed; session state is unchanged apart from `error`
    Failed(Error),
    /// The session changed while the request was outstanding
    Discarded,
}

impl FetchOutcome {
    /// Check whether a request actually went out
    pub fn was_issued(&self) -> bool {
        !matches!(self, Self::Skipped(_))
    }
}

/// One category view's pagination state
#[derive(Debug)]
struct Session {
    id: u64,
    category: String,
    state: PaginationState,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    session: Option<Session>,
}

impl Inner {
    fn session_mut(&mut self, id: u64) -> Option<&mut Session> {
        self.session.as_mut().filter(|s| s.id == id)
    }
}

/// Drives pagination for the open category view
#[derive(Clone)]
pub struct FetchController {
    source: Arc<dyn PageSource>,
    inner: Arc<Mutex<Inner>>,
}

impl FetchController {
    /// Create a controller with no open session
    pub fn new(source: Arc<dyn PageSource>) -> Self {
        Self {
            source,
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Open a category view, replacing any existing session wholesale.
    ///
    /// Returns the new session id. Responses still outstanding for the
    /// previous session will be discarded when they arrive.
    pub fn open(&self, category: impl Into<String>) -> u64 {
        let category = category.into();
        let mut inner = self.lock();
        inner.next_id += 1;
        let id = inner.next_id;
        info!(session = id, category = %category, "Opened category session");
        inner.session = Some(Session {
            id,
            category,
            state: PaginationState::new(),
        });
        id
    }

    /// Close the category view, discarding its state
    pub fn close(&self) {
        if let Some(session) = self.lock().session.take() {
            info!(session = session.id, category = %session.category, "Closed category session");
        }
    }

    /// Id of the open session
    pub fn session_id(&self) -> Option<u64> {
        self.lock().session.as_ref().map(|s| s.id)
    }

    /// Full view of the open session
    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.lock()
            .session
            .as_ref()
            .map(|s| SessionSnapshot::new(&s.category, &s.state))
    }

    /// Gating flags of the open session
    pub fn status(&self) -> Option<SessionStatus> {
        self.lock()
            .session
            .as_ref()
            .map(|s| SessionStatus::from(&s.state))
    }

    /// Check if the open session may have more pages
    pub fn has_more(&self) -> bool {
        self.status().is_some_and(|s| s.has_more)
    }

    /// Check if a fetch is outstanding for the open session
    pub fn is_loading(&self) -> bool {
        self.status().is_some_and(|s| s.loading)
    }

    /// Fetch and merge the next page of the open session.
    ///
    /// A no-op while a fetch is outstanding or once the session is exhausted.
    /// `in_flight` is released whatever happens, including when this future
    /// is dropped before completing.
    pub async fn continue_fetch(&self) -> FetchOutcome {
        let (session_id, category, cursor) = {
            let mut inner = self.lock();
            let Some(session) = inner.session.as_mut() else {
                return FetchOutcome::Skipped(SkipReason::NoSession);
            };
            if let Err(reason) = session.state.check_ready() {
                debug!(session = session.id, ?reason, "Fetch skipped");
                return FetchOutcome::Skipped(reason);
            }
            let cursor = session.state.begin_fetch();
            (session.id, session.category.clone(), cursor)
        };

        let guard = InFlightGuard {
            inner: &self.inner,
            session_id,
        };

        debug!(
            session = session_id,
            category = %category,
            cursor = cursor.as_ref().map(|c| c.as_str()),
            "Fetching page"
        );
        let result = self.source.fetch_page(&category, cursor.as_ref()).await;

        let mut inner = self.lock();
        let Some(session) = inner.session_mut(session_id) else {
            debug!(session = session_id, "Discarding response for a closed session");
            return FetchOutcome::Discarded;
        };

        let outcome = match result {
            Ok(page) => {
                let new_items = session.state.apply_page(page);
                debug!(
                    session = session_id,
                    new_items,
                    total = session.state.items().len(),
                    exhausted = session.state.is_exhausted(),
                    "Merged page"
                );
                FetchOutcome::Fetched {
                    new_items,
                    exhausted: session.state.is_exhausted(),
                }
            }
            Err(e) => {
                warn!(session = session_id, category = %category, "Fetch failed: {e}");
                session.state.record_failure(describe_failure(&e));
                FetchOutcome::Failed(e)
            }
        };
        session.state.finish_fetch();
        drop(inner);
        drop(guard);
        outcome
    }
}

impl std::fmt::Debug for FetchController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchController")
            .field("session", &self.session_id())
            .finish_non_exhaustive()
    }
}

/// Releases `in_flight` if a fetch is abandoned mid-flight
struct InFlightGuard<'a> {
    inner: &'a Mutex<Inner>,
    session_id: u64,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(session) = inner.session_mut(self.session_id) {
            session.state.finish_fetch();
        }
    }
}
