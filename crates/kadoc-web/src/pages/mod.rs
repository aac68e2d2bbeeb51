//! List, detail and create pages for snippets and documentation articles.

use std::fmt;

pub mod articles;
pub mod snippets;

/// Why a successfully loaded list has nothing to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyState {
    /// A filter is active and nothing matched it.
    NoMatches(String),
    /// Nothing has been created yet.
    EmptyLibrary,
}

impl EmptyState {
    pub(crate) fn for_filter(filter: Option<&str>) -> Self {
        match filter.map(str::trim).filter(|f| !f.is_empty()) {
            Some(filter) => EmptyState::NoMatches(filter.to_string()),
            None => EmptyState::EmptyLibrary,
        }
    }
}

impl fmt::Display for EmptyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyState::NoMatches(filter) => write!(f, "no matches for '{filter}'"),
            EmptyState::EmptyLibrary => f.write_str("the library is empty"),
        }
    }
}
