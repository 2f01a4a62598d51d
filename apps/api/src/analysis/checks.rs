//! Soft schema checks on a decoded report.
//!
//! Nothing here rejects a report. Findings are logged so that a model that drifts
//! from the requested shape shows up in the logs before it shows up on screen.
//!
//! `check_scores` looks at the raw JSON, since an unreadable score is already 0 once
//! decoded. `check_result` looks at the decoded report.

use serde_json::Value;
use thiserror::Error;

use crate::models::analysis::{parse_score, AnalysisResult};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaWarning {
    #[error("report has no news items")]
    NoNews,

    #[error("report has no job stats")]
    NoJobStats,

    #[error("bestOpportunityRole is empty")]
    NoBestOpportunityRole,

    #[error("capability breakdown for '{role_category}' sums to {sum}, expected 100")]
    BreakdownSum { role_category: String, sum: u32 },

    #[error("{field} is not a number ({value}), read as 0")]
    UnreadableScore { field: String, value: String },
}

/// Flags score fields whose raw value is neither `null` nor a readable number.
pub fn check_scores(raw: &Value) -> Vec<SchemaWarning> {
    let mut warnings = Vec::new();
    let mut inspect = |field: String, value: Option<&Value>| {
        if let Some(value) = value.filter(|v| !v.is_null()) {
            if parse_score(value).is_none() {
                warnings.push(SchemaWarning::UnreadableScore {
                    field,
                    value: value.to_string(),
                });
            }
        }
    };

    for (i, stat) in entries(raw.get("jobStats")).enumerate() {
        inspect(format!("jobStats[{i}].volumeIndex"), stat.get("volumeIndex"));
        inspect(format!("jobStats[{i}].difficulty"), stat.get("difficulty"));
    }
    for (i, city) in entries(raw.get("topCities")).enumerate() {
        inspect(format!("topCities[{i}].heatIndex"), city.get("heatIndex"));
    }
    for (i, skill) in entries(raw.get("skills")).enumerate() {
        for (j, weight) in entries(skill.get("capabilityBreakdown")).enumerate() {
            inspect(
                format!("skills[{i}].capabilityBreakdown[{j}].percentage"),
                weight.get("percentage"),
            );
        }
    }

    warnings
}

/// Object entries of a list field, counted the way the decoder keeps them.
fn entries(value: Option<&Value>) -> impl Iterator<Item = &Value> {
    let items: &[Value] = match value {
        Some(Value::Array(items)) => items,
        Some(object @ Value::Object(_)) => std::slice::from_ref(object),
        _ => &[],
    };
    items.iter().filter(|v| v.is_object())
}

pub fn check_result(result: &AnalysisResult) -> Vec<SchemaWarning> {
    let mut warnings = Vec::new();

    if result.news.is_empty() {
        warnings.push(SchemaWarning::NoNews);
    }
    if result.job_stats.is_empty() {
        warnings.push(SchemaWarning::NoJobStats);
    }
    if result.best_opportunity_role.trim().is_empty() {
        warnings.push(SchemaWarning::NoBestOpportunityRole);
    }

    for skill in &result.skills {
        // An absent breakdown is already "empty"; only a present one must add up.
        if skill.capability_breakdown.is_empty() {
            continue;
        }
        let sum: u32 = skill
            .capability_breakdown
            .iter()
            .map(|w| u32::from(w.percentage))
            .sum();
        if sum != 100 {
            warnings.push(SchemaWarning::BreakdownSum {
                role_category: skill.role_category.clone(),
                sum,
            });
        }
    }

    warnings
}
