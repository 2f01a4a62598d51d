use crate::analysis::controller::AnalysisController;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Owns the single analysis state and the LLM client behind it.
    pub analysis: AnalysisController,
}
