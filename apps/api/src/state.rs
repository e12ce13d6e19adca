use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::Collaborator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The model collaborator. `LlmClient` in production, scripted in tests.
    pub collaborator: Arc<dyn Collaborator>,
    pub config: Config,
}
