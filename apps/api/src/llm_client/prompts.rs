// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Output-format instruction appended to prompts that expect a JSON object back.
/// The response normalizer recovers the object from exactly this fencing.
pub const FENCED_JSON_INSTRUCTION: &str = "\
    You MUST return a valid JSON object wrapped in ```json``` code block. \
    Do NOT add commentary before or after the code block. \
    Use plain JSON numbers (no quotes, no percent signs) for every index and percentage field.";

/// Instruction that keeps generated numbers honest when search grounding is on.
pub const SOURCING_INSTRUCTION: &str = "\
    CRITICAL: Base every claim on what the search results actually say. \
    Prefer official statistics and named policy documents over general impressions. \
    If a figure cannot be sourced, give a conservative estimate rather than a precise-looking number.";
