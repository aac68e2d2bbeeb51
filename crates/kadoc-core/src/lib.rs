//! kadoc-core
//!
//! Pure domain types, validation rules, and API path conventions.
//! No HTTP dependency; this is the shared vocabulary of the Kadoc client,
//! front-end, and API server.

pub mod api_paths;
pub mod error;
pub mod models;
pub mod validate;
