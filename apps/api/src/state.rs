use std::sync::Arc;

use crate::tailoring::nlp::Capabilities;
use crate::tailoring::settings::TailorConfig;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Base tailoring config. Requests derive per-run copies and never mutate it.
    pub tailor_config: Arc<TailorConfig>,
    /// Tokenizer backends available to this process.
    pub capabilities: Capabilities,
}
