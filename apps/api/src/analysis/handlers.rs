//! Axum route handlers for the Job Analysis API.

use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;
use tracing::info;
use uuid::Uuid;

use crate::analysis::analyzer::{AnalysisOutcome, AnalysisSource};
use crate::analysis::models::JobAnalysis;
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub jd_text: String,
    /// Caller identity supplied by the auth layer; only used for logging.
    #[serde(default)]
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeResponse {
    pub analysis: JobAnalysis,
    pub source: AnalysisSource,
    pub analyzed_at: DateTime<Utc>,
}

impl From<AnalysisOutcome> for AnalyzeResponse {
    fn from(outcome: AnalysisOutcome) -> Self {
        Self {
            analysis: outcome.analysis,
            source: outcome.source,
            analyzed_at: Utc::now(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BatchAnalyzeRequest {
    pub jd_texts: Vec<String>,
    #[serde(default)]
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct BatchAnalyzeResponse {
    /// Same order as the request's `jd_texts`.
    pub results: Vec<AnalyzeResponse>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs/analyze
///
/// Parses a raw job description into a structured `JobAnalysis`.
/// Empty descriptions are valid and produce a default-valued analysis.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    ensure_within_limit("jd_text", &request.jd_text, state.config.max_text_chars)?;

    info!(
        "Analyzing job description for user {:?} ({} backend)",
        request.user_id,
        state.analyzer.backend()
    );
    let outcome = state.analyzer.analyze(&request.jd_text).await;

    Ok(Json(outcome.into()))
}

/// POST /api/v1/jobs/analyze/batch
///
/// Analyzes several postings concurrently, one task per posting.
pub async fn handle_analyze_batch(
    State(state): State<AppState>,
    Json(request): Json<BatchAnalyzeRequest>,
) -> Result<Json<BatchAnalyzeResponse>, AppError> {
    if request.jd_texts.is_empty() {
        return Err(AppError::Validation("jd_texts cannot be empty".to_string()));
    }
    if request.jd_texts.len() > state.config.max_batch_size {
        return Err(AppError::Validation(format!(
            "jd_texts holds {} postings; the limit is {}",
            request.jd_texts.len(),
            state.config.max_batch_size
        )));
    }
    for jd_text in &request.jd_texts {
        ensure_within_limit("jd_texts[]", jd_text, state.config.max_text_chars)?;
    }

    info!(
        "Batch analyzing {} job descriptions for user {:?}",
        request.jd_texts.len(),
        request.user_id
    );

    let mut tasks = JoinSet::new();
    for (index, jd_text) in request.jd_texts.into_iter().enumerate() {
        let analyzer = Arc::clone(&state.analyzer);
        tasks.spawn(async move { (index, analyzer.analyze(&jd_text).await) });
    }

    let mut outcomes = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        let (index, outcome) = joined
            .map_err(|e| AppError::Internal(anyhow::anyhow!("analysis task failed: {e}")))?;
        outcomes.push((index, outcome));
    }
    outcomes.sort_by_key(|(index, _)| *index);

    Ok(Json(BatchAnalyzeResponse {
        results: outcomes
            .into_iter()
            .map(|(_, outcome)| outcome.into())
            .collect(),
    }))
}

/// Rejects texts longer than the configured character limit.
pub fn ensure_within_limit(field: &str, text: &str, max_chars: usize) -> Result<(), AppError> {
    if text.chars().count() > max_chars {
        return Err(AppError::Validation(format!(
            "{field} exceeds the {max_chars} character limit"
        )));
    }
    Ok(())
}
