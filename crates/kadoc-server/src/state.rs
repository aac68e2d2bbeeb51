use std::sync::Arc;

use tokio::sync::Mutex;

use crate::store::MemoryStore;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone, Default)]
pub struct AppState {
    pub store: Arc<Mutex<MemoryStore>>,
}
