//! Prompt Builder: turns an `AnalysisRequest` into the instruction sent to the model.

use crate::analysis::prompts::ANALYSIS_PROMPT_TEMPLATE;
use crate::llm_client::prompts::{FENCED_JSON_INSTRUCTION, SOURCING_INSTRUCTION};
use crate::models::request::AnalysisRequest;

/// Fills the analysis template. Pure and total: same request, same prompt.
pub fn build_prompt(request: &AnalysisRequest) -> String {
    ANALYSIS_PROMPT_TEMPLATE
        .replace("{sourcing_instruction}", SOURCING_INSTRUCTION)
        .replace("{output_instruction}", FENCED_JSON_INSTRUCTION)
        .replace("{industry}", request.industry.label())
        .replace("{candidate_type}", request.candidate_type.label())
        .replace("{language}", request.language.directive())
        .replace("{date}", &request.date)
}
