//! Debounced search box synchronized with the `q` location parameter.
//!
//! The controller owns the text the user is typing. Every edit replaces the
//! single scheduled propagation; once the quiet period elapses without a
//! further edit, the trimmed text is written into the current location as
//! `q` (or `q` is removed when the text is blank). Changes to `q` made by
//! anything else (back/forward, links) flow back into the text without
//! scheduling a propagation.

use std::sync::Arc;
use std::time::Duration;

use kadoc_core::api_paths::SEARCH_PARAM;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

use crate::location::{History, HistoryState};

pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

#[derive(Debug, Default)]
struct Shared {
    local_text: String,
    /// Bumped by every edit and every external `q` change. A scheduled
    /// propagation only runs if the generation it captured is still current.
    generation: u64,
    /// Revision of the last location this controller wrote.
    own_revision: Option<u64>,
    /// `q` as of the last observed revision.
    last_seen_q: Option<String>,
}

pub struct SearchController {
    history: History,
    quiet_period: Duration,
    shared: Arc<Mutex<Shared>>,
    pending: Option<JoinHandle<()>>,
    watcher: JoinHandle<()>,
}

impl SearchController {
    /// Attach to `history`, seeding the text from the current `q`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(history: History, quiet_period: Duration) -> Self {
        // Subscribe before returning so navigations made right after `new`
        // are seen by the watcher even if it hasn't been polled yet.
        let mut rx = history.subscribe();
        let q = rx.borrow_and_update().location().query_param(SEARCH_PARAM);
        let shared = Arc::new(Mutex::new(Shared {
            local_text: q.clone().unwrap_or_default(),
            last_seen_q: q,
            ..Shared::default()
        }));
        let watcher = tokio::spawn(watch_location(rx, Arc::clone(&shared)));
        Self {
            history,
            quiet_period,
            shared,
            pending: None,
            watcher,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// The text currently in the search box.
    pub async fn text(&self) -> String {
        self.shared.lock().await.local_text.clone()
    }

    /// Whether a scheduled propagation task is still outstanding.
    pub fn has_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Record an edit and reschedule propagation for one quiet period from
    /// now, cancelling whatever was scheduled before.
    pub async fn on_edit(&mut self, text: impl Into<String>) {
        let generation = {
            let mut shared = self.shared.lock().await;
            shared.local_text = text.into();
            shared.generation += 1;
            shared.generation
        };

        if let Some(previous) = self.pending.take() {
            previous.abort();
        }

        let shared = Arc::clone(&self.shared);
        let history = self.history.clone();
        let quiet_period = self.quiet_period;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;
            propagate(&shared, &history, generation).await;
        }));
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
        self.watcher.abort();
    }
}

async fn propagate(shared: &Mutex<Shared>, history: &History, generation: u64) {
    let mut shared = shared.lock().await;
    if shared.generation != generation {
        tracing::trace!(generation, "stale search propagation skipped");
        return;
    }

    let query = shared.local_text.trim().to_string();
    // Written while holding the lock so the watcher can't observe this
    // revision before `own_revision` records it. A `q` the watcher hasn't
    // caught up with yet came from someone else and wins over this edit.
    let expected = shared.last_seen_q.clone();
    let revision = history.replace_if(|location| {
        if location.query_param(SEARCH_PARAM) != expected {
            return None;
        }
        Some(if query.is_empty() {
            location.without_query_param(SEARCH_PARAM)
        } else {
            location.with_query_param(SEARCH_PARAM, &query)
        })
    });
    let Some(revision) = revision else {
        tracing::debug!(generation, "search propagation yielded to a newer location");
        return;
    };
    shared.own_revision = Some(revision);
    shared.last_seen_q = Some(query).filter(|q| !q.is_empty());
    tracing::debug!(revision, q = ?shared.last_seen_q, "search propagated");
}

async fn watch_location(mut rx: watch::Receiver<HistoryState>, shared: Arc<Mutex<Shared>>) {
    while rx.changed().await.is_ok() {
        let (revision, q) = {
            let state = rx.borrow_and_update();
            (state.revision(), state.location().query_param(SEARCH_PARAM))
        };

        let mut shared = shared.lock().await;
        if shared.own_revision == Some(revision) || shared.last_seen_q == q {
            shared.last_seen_q = q;
            continue;
        }

        tracing::debug!(revision, ?q, "search text resynced from location");
        shared.local_text = q.clone().unwrap_or_default();
        shared.last_seen_q = q;
        shared.generation += 1;
    }
}
