//! Response Normalizer: recovers one `AnalysisResult` from loosely formatted model text.
//!
//! The model is asked for a fenced JSON block but may answer with bare JSON, extra
//! prose, or a broken fence. Three attempts run in a fixed order and the first one
//! that decodes wins:
//!
//! 1. the raw text as-is
//! 2. the body of the first ```json fenced block
//! 3. the whole text with every fence token removed
//!
//! An attempt succeeds when its text is a JSON object; field-level type drift is
//! absorbed by the lenient decoders in `models::analysis`. If no attempt yields an
//! object, the result is a `ParseError`; there is no empty-report fallback.
//! After a successful decode, news items are matched against grounding citations.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::analysis::checks::{check_scores, SchemaWarning};
use crate::llm_client::Citation;
use crate::models::analysis::{AnalysisResult, NewsItem};

/// URL written to news items that have no external link.
pub const NO_LINK: &str = "#";

const FENCE_OPEN_JSON: &str = "```json";
const FENCE: &str = "```";

/// First ```json block whose body sits on its own lines.
static FENCED_JSON_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```json[ \t]*\r?\n(.*?)\r?\n[ \t]*```").expect("fence pattern is valid")
});

/// Which attempt produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Direct,
    FencedBlock,
    StrippedFences,
}

/// A decoded report, the attempt that produced it, and score findings from the raw JSON.
#[derive(Debug)]
pub struct Recovered {
    pub result: AnalysisResult,
    pub strategy: Strategy,
    pub warnings: Vec<SchemaWarning>,
}

/// Fatal: no attempt produced a JSON object.
#[derive(Debug, Error)]
#[error("Could not parse AI response")]
pub struct ParseError {
    raw: String,
    attempts: Vec<String>,
}

impl ParseError {
    /// The untouched model output, for diagnostics.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// One line per failed attempt, in attempt order.
    pub fn attempts(&self) -> &[String] {
        &self.attempts
    }
}

#[derive(Debug, Error)]
enum AttemptError {
    #[error("no ```json block found")]
    NoFencedBlock,
    #[error("top-level JSON is not an object")]
    NotAnObject,
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

type Attempt = fn(&str) -> Result<Value, AttemptError>;

const ATTEMPTS: [(Strategy, Attempt); 3] = [
    (Strategy::Direct, parse_direct),
    (Strategy::FencedBlock, parse_fenced_block),
    (Strategy::StrippedFences, parse_stripped),
];

fn parse_direct(text: &str) -> Result<Value, AttemptError> {
    parse_object(text)
}

fn parse_fenced_block(text: &str) -> Result<Value, AttemptError> {
    let body = FENCED_JSON_BLOCK
        .captures(text)
        .and_then(|c| c.get(1))
        .ok_or(AttemptError::NoFencedBlock)?;
    parse_object(body.as_str())
}

fn parse_stripped(text: &str) -> Result<Value, AttemptError> {
    parse_object(&strip_fences(text))
}

fn parse_object(text: &str) -> Result<Value, AttemptError> {
    match serde_json::from_str(text)? {
        object @ Value::Object(_) => Ok(object),
        _ => Err(AttemptError::NotAnObject),
    }
}

fn decode(raw: Value) -> Result<(AnalysisResult, Vec<SchemaWarning>), AttemptError> {
    let warnings = check_scores(&raw);
    Ok((serde_json::from_value(raw)?, warnings))
}

/// Removes every ```json token, then every remaining ``` token.
fn strip_fences(text: &str) -> String {
    text.replace(FENCE_OPEN_JSON, "").replace(FENCE, "")
}

/// Runs the attempts in order and reports which one succeeded.
pub fn recover(raw_text: &str) -> Result<Recovered, ParseError> {
    let mut failures = Vec::with_capacity(ATTEMPTS.len());

    for (strategy, attempt) in ATTEMPTS {
        match attempt(raw_text).and_then(decode) {
            Ok((result, warnings)) => {
                debug!("AI response recovered via {strategy:?}");
                for warning in &warnings {
                    warn!("Analysis schema check: {warning}");
                }
                return Ok(Recovered {
                    result,
                    strategy,
                    warnings,
                });
            }
            Err(e) => {
                debug!("{strategy:?} attempt failed: {e}");
                failures.push(format!("{strategy:?}: {e}"));
            }
        }
    }

    Err(ParseError {
        raw: raw_text.to_string(),
        attempts: failures,
    })
}

/// Recovers the report from `raw_text` and attaches citation links to its news.
pub fn extract_result(
    raw_text: &str,
    citations: &[Citation],
) -> Result<AnalysisResult, ParseError> {
    let mut result = recover(raw_text)?.result;
    enrich_news(&mut result.news, citations);
    Ok(result)
}

/// Fills `url` on every news item that has none.
///
/// Match rule: first citation whose title contains the news title (case-sensitive).
/// Substring matching can pair a short headline with the wrong article; kept as-is.
/// No match, no citations, or a citation without a URI all give `NO_LINK`.
pub fn enrich_news(news: &mut [NewsItem], citations: &[Citation]) {
    for item in news.iter_mut() {
        if item.url.as_deref().is_some_and(|u| !u.is_empty()) {
            continue;
        }

        let uri = citations
            .iter()
            .find(|c| {
                c.title
                    .as_deref()
                    .is_some_and(|title| title.contains(item.title.as_str()))
            })
            .and_then(|c| c.uri.as_deref())
            .filter(|uri| !uri.is_empty());

        item.url = Some(uri.unwrap_or(NO_LINK).to_string());
    }
}
