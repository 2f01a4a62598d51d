//! The structured report decoded from the model's JSON answer.
//!
//! Decoding is lenient on shape. Any JSON object decodes: a missing key or a `null`
//! becomes the empty value for that field, numbers and bools in text positions become
//! text, a bare string in a list position becomes a one-item list, and list entries
//! that are not objects are skipped. Scores accept ints, floats and numeric strings,
//! are clamped to 0–100, and read as 0 when unreadable (see `analysis::checks`).

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(default, deserialize_with = "text")]
    pub date: String,
    #[serde(default, deserialize_with = "text")]
    pub industry: String,
    #[serde(default, deserialize_with = "records")]
    pub news: Vec<NewsItem>,
    #[serde(default, deserialize_with = "records")]
    pub job_stats: Vec<JobStat>,
    #[serde(default, deserialize_with = "records")]
    pub skills: Vec<SkillRequirement>,
    #[serde(default, deserialize_with = "records")]
    pub top_cities: Vec<CityStat>,
    #[serde(default, deserialize_with = "records")]
    pub recommended_companies: Vec<CompanyCategory>,
    #[serde(default, deserialize_with = "record")]
    pub market_sentiment: MarketSentiment,
    #[serde(default, deserialize_with = "text")]
    pub best_opportunity_role: String,
    #[serde(default, deserialize_with = "records")]
    pub yearly_guide: Vec<YearlyStrategy>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    #[serde(default, deserialize_with = "text")]
    pub title: String,
    #[serde(default, deserialize_with = "text")]
    pub summary: String,
    #[serde(
        default,
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub source: Option<String>,
    /// Article link; `"#"` once enrichment found nothing.
    #[serde(
        default,
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStat {
    #[serde(default, deserialize_with = "text")]
    pub role: String,
    /// Hiring volume, 0–100.
    #[serde(default, deserialize_with = "score")]
    pub volume_index: u8,
    /// 0–100
    #[serde(default, deserialize_with = "score")]
    pub difficulty: u8,
    #[serde(default, deserialize_with = "text")]
    pub primary_skill: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapabilityWeight {
    #[serde(default, deserialize_with = "text")]
    pub name: String,
    #[serde(default, deserialize_with = "score")]
    pub percentage: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillRequirement {
    #[serde(default, deserialize_with = "text")]
    pub role_category: String,
    #[serde(default, deserialize_with = "text_list")]
    pub hard_skills: Vec<String>,
    #[serde(default, deserialize_with = "text_list")]
    pub soft_skills: Vec<String>,
    #[serde(default, deserialize_with = "text")]
    pub success_tip: String,
    #[serde(default, deserialize_with = "text")]
    pub preferred_student_profile: String,
    /// Expected to sum to 100; see `analysis::checks`.
    #[serde(default, deserialize_with = "records")]
    pub capability_breakdown: Vec<CapabilityWeight>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityStat {
    #[serde(default, deserialize_with = "text")]
    pub name: String,
    #[serde(default, deserialize_with = "score")]
    pub heat_index: u8,
    #[serde(default, deserialize_with = "text")]
    pub desc: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    #[serde(default, deserialize_with = "text")]
    pub name: String,
    #[serde(default, deserialize_with = "text")]
    pub location: String,
    /// Market cap, valuation or head count, free text.
    #[serde(default, deserialize_with = "text")]
    pub scale: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyCategory {
    #[serde(default, deserialize_with = "text")]
    pub category_name: String,
    #[serde(default, deserialize_with = "text")]
    pub description: String,
    #[serde(default, deserialize_with = "records")]
    pub companies: Vec<CompanyInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSentiment {
    #[serde(default, deserialize_with = "text")]
    pub summary: String,
    #[serde(default, deserialize_with = "text_list")]
    pub keywords: Vec<String>,
    #[serde(default, deserialize_with = "text_list")]
    pub opportunities: Vec<String>,
    #[serde(default, deserialize_with = "text_list")]
    pub risks: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyStrategy {
    #[serde(default, deserialize_with = "text")]
    pub year: String,
    #[serde(default, deserialize_with = "text")]
    pub focus: String,
    #[serde(default, deserialize_with = "text_list")]
    pub recommended_roles: Vec<String>,
    #[serde(default, deserialize_with = "text")]
    pub reasoning: String,
}

impl AnalysisResult {
    /// Company categories restricted to companies whose location contains `city`,
    /// so `北京` keeps `北京市`. Case-sensitive. Category order is kept; a category
    /// with no company in the city stays, empty.
    pub fn companies_in(&self, city: &str) -> Vec<CompanyCategory> {
        self.recommended_companies
            .iter()
            .map(|category| CompanyCategory {
                category_name: category.category_name.clone(),
                description: category.description.clone(),
                companies: category
                    .companies
                    .iter()
                    .filter(|c| c.location.contains(city))
                    .cloned()
                    .collect(),
            })
            .collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Lenient field decoders
// ────────────────────────────────────────────────────────────────────────────

fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_of(&Value::deserialize(deserializer)?))
}

fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok((!value.is_null()).then(|| text_of(&value)))
}

fn text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.iter().filter(|v| !v.is_null()).map(text_of).collect(),
        Value::Null | Value::Object(_) => Vec::new(),
        Value::String(s) if s.trim().is_empty() => Vec::new(),
        other => vec![text_of(&other)],
    })
}

fn records<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| T::deserialize(item).ok())
            .collect(),
        object @ Value::Object(_) => T::deserialize(object).ok().into_iter().collect(),
        _ => Vec::new(),
    })
}

fn record<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(match Value::deserialize(deserializer)? {
        object @ Value::Object(_) => T::deserialize(object).unwrap_or_default(),
        _ => T::default(),
    })
}

fn score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(parse_score(&Value::deserialize(deserializer)?).unwrap_or(0))
}

fn text_of(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .filter(|v| !v.is_null())
            .map(text_of)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

/// Reads a 0–100 score from an int, a float (rounded) or a numeric string with an
/// optional `%`. `None` for `null` and for anything unreadable.
pub fn parse_score(value: &Value) -> Option<u8> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then(|| n.round().clamp(0.0, 100.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn company(name: &str, location: &str) -> CompanyInfo {
        CompanyInfo {
            name: name.to_string(),
            location: location.to_string(),
            scale: "1B".to_string(),
        }
    }

    #[test]
    fn test_empty_object_decodes_to_empty_result() {
        let result: AnalysisResult = serde_json::from_str("{}").unwrap();
        assert_eq!(result, AnalysisResult::default());
        assert!(result.news.is_empty());
        assert!(result.market_sentiment.keywords.is_empty());
    }

    #[test]
    fn test_null_lists_decode_as_empty() {
        let json = r#"{
            "industry": "金融",
            "news": null,
            "topCities": null,
            "marketSentiment": null,
            "bestOpportunityRole": null
        }"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.industry, "金融");
        assert!(result.news.is_empty());
        assert!(result.top_cities.is_empty());
        assert_eq!(result.market_sentiment, MarketSentiment::default());
        assert_eq!(result.best_opportunity_role, "");
    }

    #[test]
    fn test_camel_case_fields_decode() {
        let json = r#"{
            "jobStats": [{"role": "PM", "volumeIndex": 75, "difficulty": 80, "primarySkill": "Data"}],
            "skills": [{
                "roleCategory": "Product",
                "hardSkills": ["SQL"],
                "softSkills": ["Empathy"],
                "successTip": "Intern early",
                "preferredStudentProfile": "Curious",
                "capabilityBreakdown": [{"name": "Internship Experience", "percentage": 40}]
            }],
            "yearlyGuide": [{"year": "大一", "focus": "Explore", "recommendedRoles": ["Ops"], "reasoning": "Low bar"}]
        }"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.job_stats[0].volume_index, 75);
        assert_eq!(result.job_stats[0].primary_skill, "Data");
        assert_eq!(result.skills[0].capability_breakdown[0].percentage, 40);
        assert_eq!(result.yearly_guide[0].recommended_roles, vec!["Ops"]);
    }

    #[test]
    fn test_scores_accept_floats_and_strings_and_clamp() {
        let json = r#"[
            {"name": "A", "heatIndex": 87.6, "desc": ""},
            {"name": "B", "heatIndex": "42%", "desc": ""},
            {"name": "C", "heatIndex": 140, "desc": ""},
            {"name": "D", "heatIndex": -5, "desc": ""},
            {"name": "E", "heatIndex": null, "desc": ""}
        ]"#;
        let cities: Vec<CityStat> = serde_json::from_str(json).unwrap();
        let heat: Vec<u8> = cities.iter().map(|c| c.heat_index).collect();
        assert_eq!(heat, vec![88, 42, 100, 0, 0]);
    }

    #[test]
    fn test_non_numeric_score_reads_as_zero() {
        let json = r#"{"role": "PM", "volumeIndex": "high", "difficulty": true}"#;
        let stat: JobStat = serde_json::from_str(json).unwrap();
        assert_eq!(stat.volume_index, 0);
        assert_eq!(stat.difficulty, 0);
        assert_eq!(stat.role, "PM");
    }

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score(&serde_json::json!(64.4)), Some(64));
        assert_eq!(parse_score(&serde_json::json!(" 90 % ")), Some(90));
        assert_eq!(parse_score(&serde_json::json!("NaN")), None);
        assert_eq!(parse_score(&serde_json::json!("high")), None);
        assert_eq!(parse_score(&serde_json::Value::Null), None);
    }

    #[test]
    fn test_numbers_and_bools_in_text_fields_become_text() {
        let json = r#"{
            "date": 20261018,
            "yearlyGuide": [{"year": 1, "focus": "Explore", "recommendedRoles": [], "reasoning": false}],
            "topCities": [{"name": "Shenzhen", "heatIndex": 90, "desc": 3.5}]
        }"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.date, "20261018");
        assert_eq!(result.yearly_guide[0].year, "1");
        assert_eq!(result.yearly_guide[0].reasoning, "false");
        assert_eq!(result.top_cities[0].desc, "3.5");
    }

    #[test]
    fn test_bare_string_in_list_position_becomes_one_item() {
        let json = r#"{
            "marketSentiment": {"summary": "warm", "keywords": "AI, 出海", "risks": "", "opportunities": 5},
            "skills": [{"roleCategory": "Ops", "hardSkills": "Excel", "softSkills": ["Grit", null]}]
        }"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.market_sentiment.keywords, vec!["AI, 出海"]);
        assert!(result.market_sentiment.risks.is_empty());
        assert_eq!(result.market_sentiment.opportunities, vec!["5"]);
        assert_eq!(result.skills[0].hard_skills, vec!["Excel"]);
        assert_eq!(result.skills[0].soft_skills, vec!["Grit"]);
    }

    #[test]
    fn test_record_lists_skip_non_objects_and_accept_a_single_object() {
        let json = r#"{
            "news": ["just a headline", {"title": "Real item", "summary": "s", "source": 36}],
            "jobStats": {"role": "PM", "volumeIndex": 50},
            "marketSentiment": "bullish",
            "topCities": "Shanghai"
        }"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.news.len(), 1);
        assert_eq!(result.news[0].title, "Real item");
        assert_eq!(result.news[0].source.as_deref(), Some("36"));
        assert_eq!(result.job_stats.len(), 1);
        assert_eq!(result.job_stats[0].volume_index, 50);
        assert_eq!(result.market_sentiment, MarketSentiment::default());
        assert!(result.top_cities.is_empty());
    }

    #[test]
    fn test_serialization_uses_camel_case_and_skips_missing_url() {
        let result = AnalysisResult {
            best_opportunity_role: "Growth Ops".to_string(),
            news: vec![NewsItem {
                title: "t".to_string(),
                summary: "s".to_string(),
                source: None,
                url: None,
            }],
            ..Default::default()
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["bestOpportunityRole"], "Growth Ops");
        assert!(value["jobStats"].as_array().unwrap().is_empty());
        assert!(value["news"][0].get("url").is_none());
    }

    #[test]
    fn test_companies_in_filters_by_location() {
        let result = AnalysisResult {
            recommended_companies: vec![
                CompanyCategory {
                    category_name: "Giants".to_string(),
                    description: String::new(),
                    companies: vec![company("A", "Beijing"), company("B", "Shanghai")],
                },
                CompanyCategory {
                    category_name: "Startups".to_string(),
                    description: String::new(),
                    companies: vec![company("C", "Hangzhou")],
                },
            ],
            ..Default::default()
        };

        let filtered = result.companies_in("Beijing");
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].companies, vec![company("A", "Beijing")]);
        assert!(filtered[1].companies.is_empty());
        assert!(result.companies_in("beijing")[0].companies.is_empty());
    }

    #[test]
    fn test_companies_in_matches_location_containing_city() {
        let result = AnalysisResult {
            recommended_companies: vec![CompanyCategory {
                category_name: "国企".to_string(),
                description: String::new(),
                companies: vec![
                    company("A", "北京市"),
                    company("B", "Beijing, China"),
                    company("C", "上海"),
                ],
            }],
            ..Default::default()
        };

        assert_eq!(result.companies_in("北京")[0].companies, vec![company("A", "北京市")]);
        assert_eq!(
            result.companies_in("Beijing")[0].companies,
            vec![company("B", "Beijing, China")]
        );
    }
}
