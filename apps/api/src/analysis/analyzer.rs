//! Job analysis assembly: pluggable, trait-based analyzer producing a `JobAnalysis`.
//!
//! Default: `DeterministicAnalyzer` (lexicon + heuristics, no I/O, fully testable).
//! Optional: `EnrichedAnalyzer` (LLM enrichment merged over the deterministic result,
//! falling back to it on any failure).
//!
//! `AppState` holds an `Arc<dyn JobAnalyzer>`, chosen at startup via config.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::analysis::enrichment::{merge_enrichment, AiEnrichment, EnrichmentError};
use crate::analysis::keywords::extract_keywords;
use crate::analysis::models::{JobAnalysis, Skill, SkillCategory, WeightedKeyword};
use crate::analysis::skills::classify_skills;
use crate::analysis::structure::analyze_structure;

const TOP_KEYWORD_TIPS: usize = 5;

const GENERIC_MATCHING_TIPS: [&str; 3] = [
    "Use specific, quantified examples that demonstrate each key skill",
    "Mirror the tone and vocabulary of the job posting in your resume",
    "Address every stated requirement explicitly, even briefly",
];

/// Which path produced an analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum AnalysisSource {
    Deterministic,
    Enriched,
    /// Enrichment was attempted and discarded.
    Fallback { reason: String },
}

#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub analysis: JobAnalysis,
    pub source: AnalysisSource,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The analyzer trait. Implement this to swap backends without touching handlers.
///
/// Implementations never fail: whatever happens, callers get a complete `JobAnalysis`.
#[async_trait]
pub trait JobAnalyzer: Send + Sync {
    async fn analyze(&self, jd_text: &str) -> AnalysisOutcome;

    /// "deterministic" or "enriched", for logs.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// DeterministicAnalyzer
// ────────────────────────────────────────────────────────────────────────────

pub struct DeterministicAnalyzer;

#[async_trait]
impl JobAnalyzer for DeterministicAnalyzer {
    async fn analyze(&self, jd_text: &str) -> AnalysisOutcome {
        AnalysisOutcome {
            analysis: analyze_off_executor(jd_text).await,
            source: AnalysisSource::Deterministic,
        }
    }

    fn backend(&self) -> &'static str {
        "deterministic"
    }
}

/// Builds the deterministic analysis of a posting: keywords, structure and skills merged,
/// plus matching tips derived from them.
pub fn analyze_job_description(jd_text: &str) -> JobAnalysis {
    let keywords = extract_keywords(jd_text);
    let structure = analyze_structure(jd_text);
    let skills = classify_skills(jd_text);

    let matching_tips =
        build_matching_tips(&keywords, &skills.required_skills, &skills.preferred_skills);

    debug!(
        "Deterministic analysis: {} keywords, {} required, {} preferred, level={:?}",
        keywords.len(),
        skills.required_skills.len(),
        skills.preferred_skills.len(),
        structure.experience_level
    );

    JobAnalysis {
        keywords,
        required_skills: skills.required_skills,
        preferred_skills: skills.preferred_skills,
        experience_level: structure.experience_level,
        industry_context: structure.industry_context,
        company_size: structure.company_size,
        role_type: structure.role_type,
        work_arrangement: structure.work_arrangement,
        benefits: structure.benefits,
        responsibilities: structure.responsibilities,
        qualifications: structure.qualifications,
        nice_to_have: structure.nice_to_have,
        red_flags: structure.red_flags,
        matching_tips,
    }
}

/// Runs `analyze_job_description` on the blocking pool. The lexicon scans are CPU-bound
/// and postings can be long.
async fn analyze_off_executor(jd_text: &str) -> JobAnalysis {
    let text = jd_text.to_owned();
    match tokio::task::spawn_blocking(move || analyze_job_description(&text)).await {
        Ok(analysis) => analysis,
        Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
        Err(e) => {
            warn!("spawn_blocking failed for job analysis, running inline: {e}");
            analyze_job_description(jd_text)
        }
    }
}

fn build_matching_tips(
    keywords: &[WeightedKeyword],
    required: &[Skill],
    preferred: &[Skill],
) -> Vec<String> {
    let mut tips = Vec::new();

    // Keywords are already sorted by weight.
    let top: Vec<&str> = keywords
        .iter()
        .take(TOP_KEYWORD_TIPS)
        .map(|k| k.keyword.as_str())
        .collect();
    if !top.is_empty() {
        tips.push(format!(
            "Feature these high-priority keywords prominently: {}",
            top.join(", ")
        ));
    }

    let technical: Vec<&str> = required
        .iter()
        .chain(preferred)
        .filter(|s| s.category == SkillCategory::Technical)
        .map(|s| s.name.as_str())
        .collect();
    if !technical.is_empty() {
        tips.push(format!(
            "Highlight hands-on experience with: {}",
            technical.join(", ")
        ));
    }

    tips.extend(GENERIC_MATCHING_TIPS.iter().map(|t| t.to_string()));
    tips
}

// ────────────────────────────────────────────────────────────────────────────
// EnrichedAnalyzer
// ────────────────────────────────────────────────────────────────────────────

/// Runs the deterministic analysis, then tries to improve it with an AI collaborator
/// bounded by `timeout`. Enrichment failures are logged and never reach the caller.
pub struct EnrichedAnalyzer {
    enrichment: Arc<dyn AiEnrichment>,
    timeout: Duration,
}

impl EnrichedAnalyzer {
    pub fn new(enrichment: Arc<dyn AiEnrichment>, timeout: Duration) -> Self {
        Self {
            enrichment,
            timeout,
        }
    }

    async fn try_enrich(
        &self,
        jd_text: &str,
        base: JobAnalysis,
    ) -> Result<JobAnalysis, EnrichmentError> {
        let payload = tokio::time::timeout(self.timeout, self.enrichment.enrich(jd_text))
            .await
            .map_err(|_| EnrichmentError::Timeout(self.timeout))??;
        merge_enrichment(base, &payload)
    }
}

#[async_trait]
impl JobAnalyzer for EnrichedAnalyzer {
    async fn analyze(&self, jd_text: &str) -> AnalysisOutcome {
        let deterministic = analyze_off_executor(jd_text).await;

        match self.try_enrich(jd_text, deterministic.clone()).await {
            Ok(analysis) => AnalysisOutcome {
                analysis,
                source: AnalysisSource::Enriched,
            },
            Err(e) => {
                warn!("AI enrichment failed, using deterministic analysis: {e}");
                AnalysisOutcome {
                    analysis: deterministic,
                    source: AnalysisSource::Fallback {
                        reason: e.to_string(),
                    },
                }
            }
        }
    }

    fn backend(&self) -> &'static str {
        "enriched"
    }
}
