use std::sync::Arc;

use crate::config::Config;
use crate::extraction::DocumentExtractor;
use crate::feedback::store::FeedbackSink;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable text extractor. Default: DefaultExtractor (pdf-extract + plain text).
    pub extractor: Arc<dyn DocumentExtractor>,
    /// Append-only feedback log. Default: JsonFileStore at FEEDBACK_STORE_PATH.
    pub feedback: Arc<dyn FeedbackSink>,
}
