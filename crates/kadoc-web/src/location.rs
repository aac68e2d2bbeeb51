//! The shareable location and the history stack that owns it.
//!
//! The current [`Location`] is the source of truth for reproducible page
//! state (e.g. the `q` search parameter). Every change bumps a revision and
//! is broadcast to subscribers.

use std::fmt;
use std::sync::Arc;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use tokio::sync::watch;
use url::form_urlencoded;

use crate::error::WebError;

/// Characters escaped inside a single path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// An app-relative URL: encoded path plus decoded query pairs in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    path: String,
    query: Vec<(String, String)>,
}

impl Location {
    /// Parse an app-relative path such as `/en/snippets?q=rust`. Any
    /// fragment is dropped.
    pub fn parse(raw: &str) -> Result<Self, WebError> {
        let raw = raw.split('#').next().unwrap_or_default();
        let (path, query) = match raw.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (raw, None),
        };
        if !path.starts_with('/') || path.starts_with("//") {
            return Err(WebError::InvalidLocation(format!(
                "{raw}: not an app-relative path"
            )));
        }
        let query = query
            .map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
            .unwrap_or_default();
        Ok(Self {
            path: path.to_string(),
            query,
        })
    }

    /// Build a location from decoded path segments, encoding each one.
    pub fn from_segments<'a>(segments: impl IntoIterator<Item = &'a str>) -> Self {
        let mut path = String::new();
        for segment in segments {
            path.push('/');
            path.extend(utf8_percent_encode(segment, SEGMENT));
        }
        if path.is_empty() {
            path.push('/');
        }
        Self {
            path,
            query: Vec::new(),
        }
    }

    pub fn root() -> Self {
        Self::from_segments([])
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Decoded, non-empty path segments.
    pub fn segments(&self) -> Vec<String> {
        self.path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned())
            .collect()
    }

    /// Encoded query string, `None` when there are no parameters.
    pub fn query(&self) -> Option<String> {
        if self.query.is_empty() {
            return None;
        }
        Some(
            form_urlencoded::Serializer::new(String::new())
                .extend_pairs(&self.query)
                .finish(),
        )
    }

    /// First value of `name`, if present.
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    }

    /// Set `name` to `value`, replacing every previous value of `name` in
    /// place and leaving all other parameters in their original order.
    pub fn with_query_param(&self, name: &str, value: &str) -> Self {
        let mut replaced = false;
        let mut query = Vec::with_capacity(self.query.len() + 1);
        for (key, existing) in &self.query {
            if key != name {
                query.push((key.clone(), existing.clone()));
            } else if !replaced {
                query.push((name.to_string(), value.to_string()));
                replaced = true;
            }
        }
        if !replaced {
            query.push((name.to_string(), value.to_string()));
        }
        Self {
            path: self.path.clone(),
            query,
        }
    }

    /// Remove every value of `name`, leaving the other parameters untouched.
    pub fn without_query_param(&self, name: &str) -> Self {
        Self {
            path: self.path.clone(),
            query: self
                .query
                .iter()
                .filter(|(key, _)| key != name)
                .cloned()
                .collect(),
        }
    }

    /// This location's query string on `other`'s path.
    pub fn with_path_of(&self, other: &Location) -> Self {
        Self {
            path: other.path.clone(),
            query: self.query.clone(),
        }
    }

    /// `/path?query` form, suitable for display and links.
    pub fn to_relative(&self) -> String {
        match self.query() {
            Some(query) => format!("{}?{query}", self.path),
            None => self.path.clone(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_relative())
    }
}

/// Back/forward stack of locations plus a revision bumped on every change.
#[derive(Debug, Clone)]
pub struct HistoryState {
    entries: Vec<Location>,
    index: usize,
    revision: u64,
}

impl HistoryState {
    pub fn location(&self) -> &Location {
        &self.entries[self.index]
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }
}

/// Shared handle to the navigation history. Clones observe the same stack.
#[derive(Debug, Clone)]
pub struct History {
    tx: Arc<watch::Sender<HistoryState>>,
}

impl History {
    pub fn new(initial: Location) -> Self {
        let (tx, _rx) = watch::channel(HistoryState {
            entries: vec![initial],
            index: 0,
            revision: 0,
        });
        Self { tx: Arc::new(tx) }
    }

    pub fn current(&self) -> Location {
        self.tx.borrow().location().clone()
    }

    pub fn revision(&self) -> u64 {
        self.tx.borrow().revision()
    }

    /// Receiver notified on every navigation.
    pub fn subscribe(&self) -> watch::Receiver<HistoryState> {
        self.tx.subscribe()
    }

    /// Navigate to `location` as a new entry, dropping any forward entries.
    /// Returns the new revision.
    pub fn push(&self, location: Location) -> u64 {
        let mut revision = 0;
        self.tx.send_modify(|state| {
            state.entries.truncate(state.index + 1);
            state.entries.push(location);
            state.index += 1;
            state.revision += 1;
            revision = state.revision;
        });
        tracing::debug!(revision, location = %self.current(), "history push");
        revision
    }

    /// Overwrite the current entry. Returns the new revision.
    pub fn replace(&self, location: Location) -> u64 {
        self.replace_with(|_| location)
    }

    /// Overwrite the current entry with a value derived from it, atomically
    /// with respect to other navigations. Returns the new revision.
    pub fn replace_with(&self, f: impl FnOnce(&Location) -> Location) -> u64 {
        match self.replace_if(|location| Some(f(location))) {
            Some(revision) => revision,
            None => self.revision(),
        }
    }

    /// Like [`History::replace_with`], but `f` may decline by returning
    /// `None`, in which case nothing changes and no subscriber is woken.
    /// Returns the new revision when the entry was replaced.
    pub fn replace_if(&self, f: impl FnOnce(&Location) -> Option<Location>) -> Option<u64> {
        let mut revision = None;
        self.tx.send_if_modified(|state| {
            let Some(next) = f(state.location()) else {
                return false;
            };
            let index = state.index;
            state.entries[index] = next;
            state.revision += 1;
            revision = Some(state.revision);
            true
        });
        if let Some(revision) = revision {
            tracing::debug!(revision, location = %self.current(), "history replace");
        }
        revision
    }

    /// Step back one entry. Returns `false` when already at the start.
    pub fn back(&self) -> bool {
        self.tx.send_if_modified(|state| {
            if !state.can_go_back() {
                return false;
            }
            state.index -= 1;
            state.revision += 1;
            true
        })
    }

    /// Step forward one entry. Returns `false` when already at the end.
    pub fn forward(&self) -> bool {
        self.tx.send_if_modified(|state| {
            if !state.can_go_forward() {
                return false;
            }
            state.index += 1;
            state.revision += 1;
            true
        })
    }
}
