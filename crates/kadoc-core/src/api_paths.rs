//! API path conventions.
//!
//! Pure string functions shared by the server router and the HTTP client.
//! These define the canonical layout of the Kadoc API under its base URL.

pub const API_PREFIX: &str = "/api";

pub const DEFAULT_API_URL: &str = "http://localhost:3006/api";

pub const SNIPPETS: &str = "snippets";

pub const ARTICLES: &str = "articles";

pub const HISTORY: &str = "history";

pub const HEALTH: &str = "health";

/// Query parameter carrying the free-text snippet filter.
pub const SEARCH_PARAM: &str = "q";

pub fn collection(resource: &str) -> String {
    format!("/{resource}")
}

/// Router pattern for a single item, e.g. `/snippets/{id}`.
pub fn item_route(resource: &str) -> String {
    format!("/{resource}/{{id}}")
}

pub fn snippet_history_route() -> String {
    format!("/{SNIPPETS}/{{id}}/{HISTORY}")
}

pub fn health_route() -> String {
    format!("/{HEALTH}")
}
