pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::errors::AppError;
use crate::matching::handlers as matching;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Job analysis
        .route("/api/v1/jobs/analyze", post(analysis::handle_analyze))
        .route(
            "/api/v1/jobs/analyze/batch",
            post(analysis::handle_analyze_batch),
        )
        // Resume matching
        .route(
            "/api/v1/jobs/compatibility",
            post(matching::handle_compatibility),
        )
        .route("/api/v1/jobs/skills-gap", post(matching::handle_skills_gap))
        .fallback(not_found)
        .with_state(state)
}
