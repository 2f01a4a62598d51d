//! Analysis pipeline: one request in, one report (or one definite failure) out.
//!
//! Flow: build_prompt → TextGenerator::generate (search on) → extract_result →
//!       schema checks (logged only) → AnalysisResult.

use thiserror::Error;
use tracing::{info, warn};

use crate::analysis::checks::check_result;
use crate::analysis::normalizer::{extract_result, ParseError};
use crate::analysis::prompt_builder::build_prompt;
use crate::llm_client::{LlmError, TextGenerator};
use crate::models::analysis::AnalysisResult;
use crate::models::request::AnalysisRequest;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("AI service call failed: {0}")]
    Transport(#[from] LlmError),

    #[error("No response from AI")]
    EmptyResponse,

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Runs the full pipeline for one request. Never retries.
pub async fn run_analysis(
    generator: &dyn TextGenerator,
    request: &AnalysisRequest,
) -> Result<AnalysisResult, AnalysisError> {
    let prompt = build_prompt(request);

    info!(
        "Requesting analysis: industry={:?} candidate={:?} language={}",
        request.industry,
        request.candidate_type,
        request.language.code()
    );
    let response = generator.generate(&prompt, true).await?;

    if response.text.trim().is_empty() {
        return Err(AnalysisError::EmptyResponse);
    }

    let result = extract_result(&response.text, &response.citations)?;

    for warning in check_result(&result) {
        warn!("Analysis schema check: {warning}");
    }

    info!(
        "Analysis ready: {} news, {} job stats, {} citations",
        result.news.len(),
        result.job_stats.len(),
        response.citations.len()
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedGenerator;
    use crate::llm_client::Citation;
    use crate::models::request::{CandidateType, Industry, Language};

    fn request() -> AnalysisRequest {
        AnalysisRequest::new(Industry::Pets, CandidateType::Graduate, Language::En, "October 18, 2026")
    }

    #[tokio::test]
    async fn test_fenced_answer_becomes_enriched_result() {
        let generator = ScriptedGenerator::replying_with_citations(
            "Sure!\n```json\n{\"industry\": \"宠物\", \"news\": [{\"title\": \"Pet Boom\", \"summary\": \"s\"}]}\n```",
            vec![Citation {
                title: Some("Pet Boom continues".to_string()),
                uri: Some("https://example.com/pets".to_string()),
            }],
        );

        let result = run_analysis(&generator, &request()).await.unwrap();
        assert_eq!(result.industry, "宠物");
        assert_eq!(result.news[0].url.as_deref(), Some("https://example.com/pets"));

        let calls = generator.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].1, "search grounding must be on");
        assert!(calls[0].0.contains("宠物"));
    }

    #[tokio::test]
    async fn test_blank_answer_is_empty_response() {
        let generator = ScriptedGenerator::replying("   ");
        let err = run_analysis(&generator, &request()).await.unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_unparseable_answer_is_parse_error() {
        let generator = ScriptedGenerator::replying("I could not find any news today.");
        let err = run_analysis(&generator, &request()).await.unwrap_err();
        match err {
            AnalysisError::Parse(e) => assert_eq!(e.raw(), "I could not find any news today."),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_transport_failure_is_not_retried() {
        let generator = ScriptedGenerator::failing(403, "API key not valid");
        let err = run_analysis(&generator, &request()).await.unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::Transport(LlmError::Api { status: 403, .. })
        ));
        assert_eq!(generator.calls().len(), 1);
    }
}
