//! AI enrichment: optional, best-effort LLM analysis merged over the deterministic one.
//!
//! The collaborator only has to return *some* JSON object. Each field is validated on its
//! own; anything missing or malformed keeps the deterministic value.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::analysis::keywords::MAX_KEYWORDS;
use crate::analysis::models::{
    JobAnalysis, Skill, SkillImportance, WeightedKeyword, GENERAL_INDUSTRY,
};
use crate::analysis::prompts::{ENRICHMENT_PROMPT_TEMPLATE, ENRICHMENT_SYSTEM};
use crate::analysis::text::MAX_LIST_ITEMS;
use crate::llm_client::{LlmClient, LlmError};

const MAX_CONTEXT_SENTENCES: usize = 3;

#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("enrichment timed out after {0:?}")]
    Timeout(Duration),

    #[error("invalid enrichment payload: {0}")]
    InvalidShape(String),
}

/// External analysis strategy. May fail arbitrarily; callers must fall back.
#[async_trait]
pub trait AiEnrichment: Send + Sync {
    async fn enrich(&self, jd_text: &str) -> Result<Value, EnrichmentError>;
}

/// Enrichment backed by Claude through the shared `LlmClient`.
pub struct LlmEnrichment {
    llm: LlmClient,
}

impl LlmEnrichment {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl AiEnrichment for LlmEnrichment {
    async fn enrich(&self, jd_text: &str) -> Result<Value, EnrichmentError> {
        let prompt = ENRICHMENT_PROMPT_TEMPLATE.replace("{jd_text}", jd_text);
        Ok(self.llm.call_json::<Value>(&prompt, ENRICHMENT_SYSTEM).await?)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Merge
// ────────────────────────────────────────────────────────────────────────────

/// Merges an enrichment payload over a deterministic analysis.
///
/// Fails only when the payload is not a JSON object. Scalar fields override when they
/// parse; list fields override when at least one entry survives validation.
pub fn merge_enrichment(base: JobAnalysis, payload: &Value) -> Result<JobAnalysis, EnrichmentError> {
    let obj = payload.as_object().ok_or_else(|| {
        EnrichmentError::InvalidShape(format!("expected a JSON object, got {}", kind(payload)))
    })?;

    Ok(JobAnalysis {
        keywords: non_empty(merge_keywords(obj)).unwrap_or(base.keywords),
        required_skills: non_empty(merge_skills(obj, "required_skills", SkillImportance::Required))
            .unwrap_or(base.required_skills),
        preferred_skills: non_empty(merge_skills(
            obj,
            "preferred_skills",
            SkillImportance::Preferred,
        ))
        .unwrap_or(base.preferred_skills),
        experience_level: field(obj, "experience_level").unwrap_or(base.experience_level),
        industry_context: field::<String>(obj, "industry_context")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(base.industry_context),
        company_size: field(obj, "company_size").unwrap_or(base.company_size),
        role_type: field(obj, "role_type").unwrap_or(base.role_type),
        work_arrangement: field(obj, "work_arrangement").unwrap_or(base.work_arrangement),
        benefits: non_empty(strings(obj, "benefits", usize::MAX)).unwrap_or(base.benefits),
        responsibilities: non_empty(strings(obj, "responsibilities", MAX_LIST_ITEMS))
            .unwrap_or(base.responsibilities),
        qualifications: non_empty(strings(obj, "qualifications", MAX_LIST_ITEMS))
            .unwrap_or(base.qualifications),
        nice_to_have: non_empty(strings(obj, "nice_to_have", MAX_LIST_ITEMS))
            .unwrap_or(base.nice_to_have),
        red_flags: non_empty(strings(obj, "red_flags", usize::MAX)).unwrap_or(base.red_flags),
        matching_tips: non_empty(strings(obj, "matching_tips", usize::MAX))
            .unwrap_or(base.matching_tips),
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    (!items.is_empty()).then_some(items)
}

fn field<T: DeserializeOwned>(obj: &Map<String, Value>, key: &str) -> Option<T> {
    obj.get(key)
        .and_then(|v| serde_json::from_value(v.clone()).ok())
}

/// Parses each array element independently, dropping the ones that don't fit `T`.
fn entries<T: DeserializeOwned>(obj: &Map<String, Value>, key: &str) -> Vec<T> {
    obj.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|v| serde_json::from_value(v.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

fn strings(obj: &Map<String, Value>, key: &str, cap: usize) -> Vec<String> {
    normalize_strings(entries(obj, key), cap)
}

fn merge_keywords(obj: &Map<String, Value>) -> Vec<WeightedKeyword> {
    normalize_keywords(entries(obj, "keywords"))
}

fn merge_skills(obj: &Map<String, Value>, key: &str, importance: SkillImportance) -> Vec<Skill> {
    normalize_skills(entries(obj, key), importance)
}

// ────────────────────────────────────────────────────────────────────────────
// Normalization
// ────────────────────────────────────────────────────────────────────────────

/// Re-applies the `JobAnalysis` bounds to an analysis built outside this engine:
/// keyword validity, ordering and caps, skill importance and list caps.
pub fn normalize_analysis(analysis: JobAnalysis) -> JobAnalysis {
    let industry_context = analysis.industry_context.trim().to_string();
    JobAnalysis {
        keywords: normalize_keywords(analysis.keywords),
        required_skills: normalize_skills(analysis.required_skills, SkillImportance::Required),
        preferred_skills: normalize_skills(analysis.preferred_skills, SkillImportance::Preferred),
        industry_context: if industry_context.is_empty() {
            GENERAL_INDUSTRY.to_string()
        } else {
            industry_context
        },
        benefits: normalize_strings(analysis.benefits, usize::MAX),
        responsibilities: normalize_strings(analysis.responsibilities, MAX_LIST_ITEMS),
        qualifications: normalize_strings(analysis.qualifications, MAX_LIST_ITEMS),
        nice_to_have: normalize_strings(analysis.nice_to_have, MAX_LIST_ITEMS),
        red_flags: normalize_strings(analysis.red_flags, usize::MAX),
        matching_tips: normalize_strings(analysis.matching_tips, usize::MAX),
        ..analysis
    }
}

fn normalize_strings(items: Vec<String>, cap: usize) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .take(cap)
        .collect()
}

/// Lowercases, drops out-of-range or duplicate entries, sorts by weight, keeps the top 25.
fn normalize_keywords(candidates: Vec<WeightedKeyword>) -> Vec<WeightedKeyword> {
    let mut keywords: Vec<WeightedKeyword> = Vec::new();
    for mut kw in candidates {
        kw.keyword = kw.keyword.trim().to_lowercase();
        let valid = !kw.keyword.is_empty()
            && kw.weight.is_finite()
            && (0.0..=1.0).contains(&kw.weight)
            && kw.frequency >= 1;
        if !valid || keywords.iter().any(|k| k.keyword == kw.keyword) {
            continue;
        }
        kw.context.truncate(MAX_CONTEXT_SENTENCES);
        keywords.push(kw);
    }
    keywords.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    keywords.truncate(MAX_KEYWORDS);
    keywords
}

/// Skills are re-tagged with the importance of the list they came from.
fn normalize_skills(candidates: Vec<Skill>, importance: SkillImportance) -> Vec<Skill> {
    let mut skills: Vec<Skill> = Vec::new();
    for mut skill in candidates {
        skill.name = skill.name.trim().to_string();
        if skill.name.is_empty()
            || skills
                .iter()
                .any(|s| s.name.eq_ignore_ascii_case(&skill.name))
        {
            continue;
        }
        skill.importance = importance;
        skills.push(skill);
    }
    skills
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::models::{
        CompanySize, ExperienceLevel, KeywordCategory, ProficiencyLevel, WorkArrangement,
    };
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn base() -> JobAnalysis {
        JobAnalysis {
            required_skills: vec![Skill::technical("React", SkillImportance::Required)],
            benefits: vec!["dental".to_string()],
            experience_level: ExperienceLevel::Senior,
            ..JobAnalysis::default()
        }
    }

    #[test]
    fn test_non_object_payload_is_rejected() {
        for payload in [json!("text"), json!([1, 2]), json!(null), json!(42)] {
            let result = merge_enrichment(base(), &payload);
            assert!(matches!(result, Err(EnrichmentError::InvalidShape(_))));
        }
    }

    #[test]
    fn test_empty_object_keeps_every_deterministic_field() {
        let merged = merge_enrichment(base(), &json!({})).unwrap();
        assert_eq!(merged, base());
    }

    #[test]
    fn test_valid_fields_override() {
        let payload = json!({
            "experience_level": "lead",
            "company_size": "large",
            "work_arrangement": "hybrid",
            "industry_context": "healthcare",
            "benefits": ["equity", "  "],
        });
        let merged = merge_enrichment(base(), &payload).unwrap();
        assert_eq!(merged.experience_level, ExperienceLevel::Lead);
        assert_eq!(merged.company_size, CompanySize::Large);
        assert_eq!(merged.work_arrangement, WorkArrangement::Hybrid);
        assert_eq!(merged.industry_context, "healthcare");
        assert_eq!(merged.benefits, vec!["equity"]);
        assert_eq!(merged.required_skills, base().required_skills);
    }

    #[test]
    fn test_invalid_fields_fall_back_individually() {
        let payload = json!({
            "experience_level": "wizard",
            "industry_context": "",
            "benefits": "not a list",
            "required_skills": [{"name": ""}, 7],
        });
        let merged = merge_enrichment(base(), &payload).unwrap();
        assert_eq!(merged, base());
    }

    #[test]
    fn test_keywords_validated_sorted_and_deduplicated() {
        let payload = json!({
            "keywords": [
                {"keyword": "Rust", "weight": 0.4, "category": "technical", "frequency": 2},
                {"keyword": "rust", "weight": 0.9, "category": "technical", "frequency": 2},
                {"keyword": "kafka", "weight": 0.8, "category": "technical", "frequency": 1,
                 "context": ["a", "b", "c", "d"]},
                {"keyword": "bad", "weight": 1.5, "category": "technical", "frequency": 1},
                {"keyword": "zero", "weight": 0.5, "category": "soft", "frequency": 0},
                {"keyword": "culture", "weight": 0.6, "category": "company", "frequency": 1},
            ]
        });
        let merged = merge_enrichment(base(), &payload).unwrap();
        let names: Vec<&str> = merged.keywords.iter().map(|k| k.keyword.as_str()).collect();
        assert_eq!(names, vec!["kafka", "culture", "rust"]);
        assert_eq!(merged.keywords[0].context.len(), 3);
        assert_eq!(merged.keywords[1].category, KeywordCategory::Company);
    }

    #[test]
    fn test_skills_retagged_with_list_importance() {
        let payload = json!({
            "preferred_skills": [
                {"name": "AWS Certified", "category": "certification", "importance": "required",
                 "proficiency_level": "advanced", "years_experience": 2}
            ]
        });
        let merged = merge_enrichment(base(), &payload).unwrap();
        let skill = &merged.preferred_skills[0];
        assert_eq!(skill.importance, SkillImportance::Preferred);
        assert_eq!(skill.proficiency_level, Some(ProficiencyLevel::Advanced));
        assert_eq!(skill.years_experience, Some(2));
    }

    #[test]
    fn test_list_sections_capped() {
        let items: Vec<String> = (0..20).map(|i| format!("item {i}")).collect();
        let merged = merge_enrichment(base(), &json!({ "responsibilities": items })).unwrap();
        assert_eq!(merged.responsibilities.len(), MAX_LIST_ITEMS);
    }

    #[test]
    fn test_normalize_analysis_restores_bounds() {
        let mut keywords: Vec<WeightedKeyword> = (0..30)
            .map(|i| WeightedKeyword {
                keyword: format!("Term{i}"),
                weight: f64::from(i) / 30.0,
                category: KeywordCategory::Technical,
                frequency: 1,
                context: vec![],
                synonyms: vec![],
            })
            .collect();
        keywords[0].weight = 1.5;
        let analysis = JobAnalysis {
            keywords,
            required_skills: vec![Skill::technical("Rust", SkillImportance::Preferred)],
            industry_context: "  ".to_string(),
            qualifications: (0..12).map(|i| format!("line {i}")).collect(),
            ..base()
        };

        let normalized = normalize_analysis(analysis);
        assert_eq!(normalized.keywords.len(), MAX_KEYWORDS);
        assert_eq!(normalized.keywords[0].keyword, "term29");
        assert!(normalized.keywords.iter().all(|k| k.weight <= 1.0));
        assert_eq!(normalized.required_skills[0].importance, SkillImportance::Required);
        assert_eq!(normalized.industry_context, "general");
        assert_eq!(normalized.qualifications.len(), MAX_LIST_ITEMS);
        assert_eq!(normalized.experience_level, ExperienceLevel::Senior);
    }

    #[test]
    fn test_normalize_keeps_engine_output_unchanged() {
        let analysis = crate::analysis::analyzer::analyze_job_description(
            "Required: React, TypeScript. Preferred: AWS. Senior remote role at a startup.",
        );
        assert_eq!(normalize_analysis(analysis.clone()), analysis);
    }

    #[tokio::test]
    async fn test_llm_enrichment_returns_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [{"type": "text", "text": "{\"company_size\": \"enterprise\"}"}],
                "usage": {"input_tokens": 10, "output_tokens": 5}
            })))
            .mount(&server)
            .await;

        let llm = LlmClient::with_base_url("k".to_string(), &server.uri()).unwrap();
        let payload = LlmEnrichment::new(llm).enrich("Any posting").await.unwrap();
        assert_eq!(payload["company_size"], "enterprise");
    }
}
