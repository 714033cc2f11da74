use std::sync::Arc;

use crate::config::Config;
use crate::extract::Extractor;
use crate::polish::AnswerPolisher;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Document extraction chain, built once from the configured capabilities.
    pub extractor: Arc<Extractor>,
    /// Pluggable answer polisher. Default: DisabledPolisher. Swap by setting
    /// ANTHROPIC_API_KEY.
    pub polisher: Arc<dyn AnswerPolisher>,
}
