use std::sync::Arc;

use kadoc_client::{KadocApi, LoadState};
use kadoc_core::api_paths::SEARCH_PARAM;
use kadoc_core::models::snippet::{Complexity, NewSnippet, Snippet, DEFAULT_LANGUAGE, LANGUAGES};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::error::WebError;
use crate::locale::Locale;
use crate::location::{History, HistoryState};
use crate::pages::EmptyState;
use crate::routes::Route;

/// What the snippet list shows: the filter it was fetched for and the
/// outcome of that fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct SnippetListView {
    pub query: Option<String>,
    pub state: LoadState<Vec<Snippet>>,
    seq: u64,
}

impl SnippetListView {
    /// Set only when the fetch succeeded with no results.
    pub fn empty_state(&self) -> Option<EmptyState> {
        match &self.state {
            LoadState::Loaded(snippets) if snippets.is_empty() => {
                Some(EmptyState::for_filter(self.query.as_deref()))
            }
            _ => None,
        }
    }
}

/// The snippet list, kept in step with the location's `q` parameter.
///
/// Every change of `q` (including the one present on open) issues a new
/// `GET /snippets`. A response that arrives after a newer fetch was issued
/// is dropped.
pub struct SnippetListPage {
    history: History,
    view: watch::Receiver<SnippetListView>,
    follower: JoinHandle<()>,
}

impl SnippetListPage {
    /// Must be called from within a tokio runtime.
    pub fn open(api: Arc<dyn KadocApi>, history: History) -> Self {
        let mut location_rx = history.subscribe();
        let query = query_of(&location_rx.borrow_and_update());

        let (tx, view) = watch::channel(SnippetListView {
            query: None,
            state: LoadState::Loading,
            seq: 0,
        });
        let tx = Arc::new(tx);
        start_fetch(&api, &tx, query.clone());

        let follower = tokio::spawn(follow_query(api, tx, location_rx, query));
        Self {
            history,
            view,
            follower,
        }
    }

    pub fn view(&self) -> SnippetListView {
        self.view.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SnippetListView> {
        self.view.clone()
    }

    /// Wait until the list reflects the current `q` and its fetch finished.
    pub async fn loaded(&mut self) -> SnippetListView {
        let history = self.history.clone();
        let settled = self
            .view
            .wait_for(|view| {
                !view.state.is_loading()
                    && view.query == history.current().query_param(SEARCH_PARAM)
            })
            .await
            .map(|view| view.clone());
        settled.unwrap_or_else(|_| self.view.borrow().clone())
    }
}

impl Drop for SnippetListPage {
    fn drop(&mut self) {
        self.follower.abort();
    }
}

fn query_of(state: &HistoryState) -> Option<String> {
    state.location().query_param(SEARCH_PARAM)
}

async fn follow_query(
    api: Arc<dyn KadocApi>,
    tx: Arc<watch::Sender<SnippetListView>>,
    mut location_rx: watch::Receiver<HistoryState>,
    mut current: Option<String>,
) {
    while location_rx.changed().await.is_ok() {
        let query = query_of(&location_rx.borrow_and_update());
        if query == current {
            continue;
        }
        current = query.clone();
        start_fetch(&api, &tx, query);
    }
}

fn start_fetch(
    api: &Arc<dyn KadocApi>,
    tx: &Arc<watch::Sender<SnippetListView>>,
    query: Option<String>,
) {
    let mut seq = 0;
    tx.send_modify(|view| {
        view.seq += 1;
        seq = view.seq;
        view.query = query.clone();
        view.state = LoadState::Loading;
    });
    tracing::debug!(seq, ?query, "fetching snippets");

    let api = Arc::clone(api);
    let tx = Arc::clone(tx);
    tokio::spawn(async move {
        let state = LoadState::from_result(api.list_snippets(query.as_deref()).await);
        let applied = tx.send_if_modified(|view| {
            if view.seq != seq {
                return false;
            }
            view.state = state;
            true
        });
        if !applied {
            tracing::debug!(seq, ?query, "stale snippet list discarded");
        }
    });
}

/// Fetch one snippet for the detail page.
/// One list entry: header line, description, then the code preview
/// indented under it.
pub fn snippet_card(snippet: &Snippet) -> String {
    let mut card = format!(
        "{}  [{}] {} (complexity {})\n    {}\n",
        snippet.id,
        snippet.language,
        snippet.title,
        snippet.complexity,
        snippet.description_or("No description"),
    );
    for line in snippet.preview().lines() {
        card.push_str("    | ");
        card.push_str(line);
        card.push('\n');
    }
    card
}

pub async fn load_snippet(api: &dyn KadocApi, id: &str) -> LoadState<Snippet> {
    LoadState::from_result(api.get_snippet(id).await)
}

/// The "new snippet" form.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSnippetForm {
    pub title: String,
    pub description: String,
    pub code: String,
    language: String,
    complexity: Complexity,
    references: Vec<String>,
    error: Option<String>,
}

impl Default for NewSnippetForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            language: DEFAULT_LANGUAGE.to_string(),
            description: String::new(),
            code: String::new(),
            complexity: Complexity::default(),
            references: Vec::new(),
            error: None,
        }
    }
}

impl NewSnippetForm {
    /// Languages the form offers, in display order.
    pub fn languages() -> &'static [&'static str] {
        LANGUAGES
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Choose one of [`NewSnippetForm::languages`], ignoring case.
    pub fn set_language(&mut self, language: &str) -> Result<(), WebError> {
        let offered = LANGUAGES
            .iter()
            .find(|offered| offered.eq_ignore_ascii_case(language.trim()))
            .ok_or_else(|| WebError::UnsupportedLanguage(language.to_string()))?;
        self.language = offered.to_string();
        Ok(())
    }

    pub fn complexity(&self) -> Complexity {
        self.complexity
    }

    pub fn set_complexity(&mut self, value: u8) -> Result<(), WebError> {
        self.complexity = Complexity::new(value)?;
        Ok(())
    }

    pub fn references(&self) -> &[String] {
        &self.references
    }

    /// Append an empty reference row and return its index.
    pub fn add_reference(&mut self) -> usize {
        self.references.push(String::new());
        self.references.len() - 1
    }

    /// Returns `false` if there is no row at `index`.
    pub fn set_reference(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.references.get_mut(index) {
            Some(row) => {
                *row = value.into();
                true
            }
            None => false,
        }
    }

    pub fn remove_reference(&mut self, index: usize) -> Option<String> {
        (index < self.references.len()).then(|| self.references.remove(index))
    }

    /// Message from the last failed submit, cleared by a successful one.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The request body this form would send: trimmed, with blank
    /// reference rows dropped.
    pub fn to_payload(&self) -> NewSnippet {
        NewSnippet {
            title: self.title.clone(),
            language: self.language.clone(),
            description: self.description.clone(),
            code: self.code.clone(),
            complexity: self.complexity.get(),
            references: self.references.clone(),
        }
        .normalized()
    }

    /// Validate, create, and on success navigate to the landing page.
    pub async fn submit(
        &mut self,
        api: &dyn KadocApi,
        history: &History,
        locale: Locale,
    ) -> Result<Snippet, WebError> {
        let payload = self.to_payload();
        if let Err(e) = payload.validate() {
            self.error = Some(e.to_string());
            return Err(e.into());
        }

        match api.create_snippet(&payload).await {
            Ok(created) => {
                self.error = None;
                history.push(Route::Landing.localized(locale).to_location());
                Ok(created)
            }
            Err(e) => {
                tracing::warn!("snippet create failed: {e}");
                let err = WebError::SaveFailed(e);
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }
}
