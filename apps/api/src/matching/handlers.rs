//! Axum route handlers for resume matching.
//!
//! Callers either send a previously returned `analysis` or a raw `jd_text` to analyze
//! on the fly.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::analysis::enrichment::normalize_analysis;
use crate::analysis::handlers::ensure_within_limit;
use crate::analysis::models::{CompatibilityScore, JobAnalysis, SkillsGap};
use crate::errors::AppError;
use crate::matching::compatibility::score_compatibility;
use crate::matching::skills_gap::identify_skills_gap;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub resume_text: String,
    #[serde(default)]
    pub jd_text: Option<String>,
    #[serde(default)]
    pub analysis: Option<JobAnalysis>,
    #[serde(default)]
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct CompatibilityResponse {
    pub compatibility: CompatibilityScore,
    pub analysis: JobAnalysis,
}

#[derive(Debug, Serialize)]
pub struct SkillsGapResponse {
    pub skills_gap: SkillsGap,
    pub analysis: JobAnalysis,
}

/// POST /api/v1/jobs/compatibility
pub async fn handle_compatibility(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<CompatibilityResponse>, AppError> {
    let (resume_text, analysis) = resolve(&state, request).await?;
    let compatibility = score_compatibility(&resume_text, &analysis);

    info!("Compatibility score: {}/100", compatibility.overall);

    Ok(Json(CompatibilityResponse {
        compatibility,
        analysis,
    }))
}

/// POST /api/v1/jobs/skills-gap
pub async fn handle_skills_gap(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<SkillsGapResponse>, AppError> {
    let (resume_text, analysis) = resolve(&state, request).await?;
    let skills_gap = identify_skills_gap(&resume_text, &analysis);

    info!(
        "Skills gap: {} missing, {} weak, {} matched",
        skills_gap.missing_skills.len(),
        skills_gap.weak_skills.len(),
        skills_gap.strength_skills.len()
    );

    Ok(Json(SkillsGapResponse {
        skills_gap,
        analysis,
    }))
}

/// Validates the request and produces the analysis to match against.
/// A client-supplied analysis is normalized to the same bounds the engine guarantees.
async fn resolve(state: &AppState, request: MatchRequest) -> Result<(String, JobAnalysis), AppError> {
    let max_chars = state.config.max_text_chars;
    ensure_within_limit("resume_text", &request.resume_text, max_chars)?;

    info!("Matching resume for user {:?}", request.user_id);

    let analysis = match (request.jd_text, request.analysis) {
        (Some(_), Some(_)) => {
            return Err(AppError::Validation(
                "Provide either jd_text or analysis, not both".to_string(),
            ))
        }
        (None, None) => {
            return Err(AppError::Validation(
                "Either jd_text or analysis is required".to_string(),
            ))
        }
        (None, Some(analysis)) => normalize_analysis(analysis),
        (Some(jd_text), None) => {
            ensure_within_limit("jd_text", &jd_text, max_chars)?;
            state.analyzer.analyze(&jd_text).await.analysis
        }
    };

    Ok((request.resume_text, analysis))
}
