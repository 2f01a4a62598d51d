// Daily market analysis.
// Implements: prompt building, response normalization, schema checks, orchestration.
// All LLM calls go through llm_client; no direct Gemini calls here.

pub mod checks;
pub mod controller;
pub mod handlers;
pub mod normalizer;
pub mod prompt_builder;
pub mod prompts;
pub mod service;
