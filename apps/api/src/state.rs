use std::sync::Arc;

use crate::llm_client::Llm;
use crate::store::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Persisted snapshot store. Production: Redis. Tests: in-memory.
    pub store: Arc<dyn SessionStore>,
    /// LLM seam. Production: the Gemini client. Tests: scripted replies.
    pub llm: Arc<dyn Llm>,
}
