//! kadoc-client
//!
//! Async HTTP client for the Kadoc API, plus the `LoadState` every page
//! collapses a request outcome into.

pub mod api;
pub mod client;
pub mod error;
pub mod load;

pub use api::KadocApi;
pub use client::KadocClient;
pub use error::ClientError;
pub use load::LoadState;
