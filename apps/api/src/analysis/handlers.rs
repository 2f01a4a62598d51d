//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::analysis::controller::AnalysisState;
use crate::analysis::normalizer::{enrich_news, recover, Recovered, Strategy};
use crate::errors::AppError;
use crate::llm_client::Citation;
use crate::models::analysis::AnalysisResult;
use crate::models::request::{CandidateType, Industry, Language, Selection};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct OptionEntry {
    pub id: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub industries: Vec<OptionEntry>,
    pub candidate_types: Vec<OptionEntry>,
    pub languages: Vec<&'static str>,
    pub selection: Selection,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisQuery {
    /// Restricts recommended companies to this city.
    pub city: Option<String>,
}

/// Any field left out keeps the previous selection.
#[derive(Debug, Default, Deserialize)]
pub struct RegenerateRequest {
    pub industry: Option<Industry>,
    pub candidate_type: Option<CandidateType>,
    pub language: Option<Language>,
}

impl RegenerateRequest {
    fn resolve(&self, previous: Selection) -> Selection {
        Selection {
            industry: self.industry.unwrap_or(previous.industry),
            candidate_type: self.candidate_type.unwrap_or(previous.candidate_type),
            language: self.language.unwrap_or(previous.language),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub text: String,
    #[serde(default)]
    pub citations: Vec<Citation>,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub strategy: Strategy,
    pub result: AnalysisResult,
    pub warnings: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/options
///
/// Lists the selectable industries, candidate types and languages.
pub async fn handle_options(State(state): State<AppState>) -> Json<OptionsResponse> {
    Json(OptionsResponse {
        industries: Industry::ALL
            .iter()
            .map(|i| OptionEntry {
                id: i.id(),
                label: i.label(),
            })
            .collect(),
        candidate_types: CandidateType::ALL
            .iter()
            .map(|c| OptionEntry {
                id: c.id(),
                label: c.label(),
            })
            .collect(),
        languages: Language::ALL.iter().map(|l| l.code()).collect(),
        selection: state.analysis.selection().await,
    })
}

/// GET /api/v1/analysis?city=
///
/// Returns the current analysis state. With `city`, a finished report only lists
/// companies located there.
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    Query(query): Query<AnalysisQuery>,
) -> Result<Json<AnalysisState>, AppError> {
    let city = match query.city.as_deref().map(str::trim) {
        Some("") => return Err(AppError::Validation("city cannot be empty".to_string())),
        other => other,
    };

    let mut snapshot = state.analysis.snapshot().await;

    if let (AnalysisState::Success { result, .. }, Some(city)) = (&mut snapshot, city) {
        result.recommended_companies = result.companies_in(city);
    }

    Ok(Json(snapshot))
}

/// POST /api/v1/analysis/regenerate
///
/// Starts a new run in the background and returns the `loading` state right away.
/// Poll GET /api/v1/analysis for the outcome.
pub async fn handle_regenerate(
    State(state): State<AppState>,
    Json(request): Json<RegenerateRequest>,
) -> (StatusCode, Json<AnalysisState>) {
    let selection = request.resolve(state.analysis.selection().await);
    let loading = state.analysis.regenerate(selection.for_today()).await;

    (StatusCode::ACCEPTED, Json(loading))
}

/// POST /api/v1/analysis/extract
///
/// Runs the response normalizer on caller-supplied text. Useful for replaying a
/// raw model answer that failed in production.
pub async fn handle_extract(
    Json(request): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, AppError> {
    let Recovered {
        mut result,
        strategy,
        warnings,
    } = recover(&request.text)?;
    enrich_news(&mut result.news, &request.citations);

    Ok(Json(ExtractResponse {
        strategy,
        result,
        warnings: warnings.iter().map(ToString::to_string).collect(),
    }))
}
