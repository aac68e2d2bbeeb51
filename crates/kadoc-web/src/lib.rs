//! kadoc-web
//!
//! Front-end controllers for the Kadoc library: the shareable location and
//! its history, the debounced search box, list/detail/create pages for
//! snippets and articles, routes, locale and theme, and the terminal
//! front-end's configuration.

pub mod config;
pub mod error;
pub mod locale;
pub mod location;
pub mod pages;
pub mod routes;
pub mod search;
pub mod state;
pub mod theme;
