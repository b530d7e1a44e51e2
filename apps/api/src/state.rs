use std::sync::Arc;

use crate::analysis::analyzer::JobAnalyzer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable analyzer. Default: DeterministicAnalyzer. EnrichedAnalyzer when an
    /// Anthropic key is configured and ENABLE_AI_ENRICHMENT is not false.
    pub analyzer: Arc<dyn JobAnalyzer>,
}
