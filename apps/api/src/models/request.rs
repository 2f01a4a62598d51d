use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Industry sectors offered by the dashboard.
/// The wire id is snake_case; `label()` is what the model sees in the prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    #[default]
    Internet,
    Ecommerce,
    Fmcg,
    Ai,
    NewEnergy,
    Finance,
    Consulting,
    Pets,
    Robotics,
    Healthcare,
}

impl Industry {
    pub const ALL: [Industry; 10] = [
        Industry::Internet,
        Industry::Ecommerce,
        Industry::Fmcg,
        Industry::Ai,
        Industry::NewEnergy,
        Industry::Finance,
        Industry::Consulting,
        Industry::Pets,
        Industry::Robotics,
        Industry::Healthcare,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Industry::Internet => "internet",
            Industry::Ecommerce => "ecommerce",
            Industry::Fmcg => "fmcg",
            Industry::Ai => "ai",
            Industry::NewEnergy => "new_energy",
            Industry::Finance => "finance",
            Industry::Consulting => "consulting",
            Industry::Pets => "pets",
            Industry::Robotics => "robotics",
            Industry::Healthcare => "healthcare",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Industry::Internet => "互联网",
            Industry::Ecommerce => "电商",
            Industry::Fmcg => "快消",
            Industry::Ai => "人工智能 (AI)",
            Industry::NewEnergy => "新能源",
            Industry::Finance => "金融",
            Industry::Consulting => "咨询",
            Industry::Pets => "宠物",
            Industry::Robotics => "机器人",
            Industry::Healthcare => "大健康医疗",
        }
    }
}

/// Which audience the analysis targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateType {
    #[default]
    Graduate,
    Intern,
}

impl CandidateType {
    pub const ALL: [CandidateType; 2] = [CandidateType::Graduate, CandidateType::Intern];

    pub fn id(&self) -> &'static str {
        match self {
            CandidateType::Graduate => "graduate",
            CandidateType::Intern => "intern",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CandidateType::Graduate => "应届毕业生",
            CandidateType::Intern => "日常实习生",
        }
    }
}

/// Output language of the generated report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "CN")]
    Cn,
    #[serde(rename = "EN")]
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Cn, Language::En];

    pub fn code(&self) -> &'static str {
        match self {
            Language::Cn => "CN",
            Language::En => "EN",
        }
    }

    /// Target-language directive embedded in the prompt.
    pub fn directive(&self) -> &'static str {
        match self {
            Language::Cn => "Simplified Chinese (简体中文)",
            Language::En => "English",
        }
    }

    /// Long-form localized date, e.g. `2026年10月18日` or `October 18, 2026`.
    pub fn format_date(&self, date: NaiveDate) -> String {
        match self {
            Language::Cn => format!("{}年{}月{}日", date.year(), date.month(), date.day()),
            Language::En => date.format("%B %-d, %Y").to_string(),
        }
    }

    /// Parses `CN` / `EN` case-insensitively.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "CN" => Some(Language::Cn),
            "EN" => Some(Language::En),
            _ => None,
        }
    }
}

/// The user's current picks, without a date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub industry: Industry,
    pub candidate_type: CandidateType,
    pub language: Language,
}

impl Selection {
    pub fn for_today(&self) -> AnalysisRequest {
        AnalysisRequest::for_today(self.industry, self.candidate_type, self.language)
    }
}

/// One user-triggered analysis request. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub industry: Industry,
    pub candidate_type: CandidateType,
    pub language: Language,
    pub date: String,
}

impl AnalysisRequest {
    pub fn new(
        industry: Industry,
        candidate_type: CandidateType,
        language: Language,
        date: impl Into<String>,
    ) -> Self {
        Self {
            industry,
            candidate_type,
            language,
            date: date.into(),
        }
    }

    pub fn selection(&self) -> Selection {
        Selection {
            industry: self.industry,
            candidate_type: self.candidate_type,
            language: self.language,
        }
    }

    /// Builds a request stamped with today's local date in the request language.
    pub fn for_today(industry: Industry, candidate_type: CandidateType, language: Language) -> Self {
        let today = Local::now().date_naive();
        Self::new(
            industry,
            candidate_type,
            language,
            language.format_date(today),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_industry_ids_roundtrip_through_serde() {
        for industry in Industry::ALL {
            let json = serde_json::to_string(&industry).unwrap();
            assert_eq!(json, format!("\"{}\"", industry.id()));
            let back: Industry = serde_json::from_str(&json).unwrap();
            assert_eq!(back, industry);
        }
    }

    #[test]
    fn test_industry_labels_are_chinese_display_names() {
        assert_eq!(Industry::Ai.label(), "人工智能 (AI)");
        assert_eq!(Industry::Healthcare.label(), "大健康医疗");
        assert_eq!(Industry::default(), Industry::Internet);
    }

    #[test]
    fn test_language_wire_form_is_upper_case() {
        assert_eq!(serde_json::to_string(&Language::Cn).unwrap(), "\"CN\"");
        let lang: Language = serde_json::from_str("\"EN\"").unwrap();
        assert_eq!(lang, Language::En);
        assert!(serde_json::from_str::<Language>("\"en\"").is_err());
    }

    #[test]
    fn test_language_from_code_is_case_insensitive() {
        assert_eq!(Language::from_code("en"), Some(Language::En));
        assert_eq!(Language::from_code(" CN "), Some(Language::Cn));
        assert_eq!(Language::from_code("fr"), None);
    }

    #[test]
    fn test_format_date_per_language() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(Language::Cn.format_date(date), "2026年3月7日");
        assert_eq!(Language::En.format_date(date), "March 7, 2026");
    }

    #[test]
    fn test_candidate_type_deserializes_from_snake_case() {
        let t: CandidateType = serde_json::from_str("\"intern\"").unwrap();
        assert_eq!(t, CandidateType::Intern);
        assert_eq!(t.label(), "日常实习生");
    }

    #[test]
    fn test_for_today_fills_a_nonempty_date() {
        let request = AnalysisRequest::for_today(Industry::Finance, CandidateType::Intern, Language::En);
        assert!(!request.date.is_empty());
        assert_eq!(request.industry, Industry::Finance);
        assert_eq!(request.selection().language, Language::En);
    }

    #[test]
    fn test_default_selection() {
        let selection = Selection::default();
        assert_eq!(selection.industry, Industry::Internet);
        assert_eq!(selection.candidate_type, CandidateType::Graduate);
        assert_eq!(selection.language, Language::Cn);
    }
}
