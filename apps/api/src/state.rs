use std::sync::Arc;

use crate::llm_client::ModelClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Model backend. `OpenAiClient` in production, a stub in tests.
    pub model: Arc<dyn ModelClient>,
}
