//! Axum route handlers for the Tailoring API.

use axum::{extract::State, Json};
use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;
use crate::tailoring::job_terms::top_terms_from_job;
use crate::tailoring::nlp::TokenizerMode;
use crate::tailoring::pipeline::{run_tailor, TailorRequest, TailorResponse};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct JobTermsRequest {
    pub job_text: String,
    pub use_linguistic: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct JobTermsResponse {
    pub mode: TokenizerMode,
    pub job_terms: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/tailor
///
/// Tailors the résumé to the job post and returns the final markdown, the
/// output file names and the selection report. Nothing is persisted.
pub async fn handle_tailor(
    State(state): State<AppState>,
    Json(request): Json<TailorRequest>,
) -> Result<Json<TailorResponse>, AppError> {
    let base = state.tailor_config.clone();
    let caps = state.capabilities.clone();
    let today = Local::now().date_naive();

    // CPU-bound: scoring, selection and markdown passes.
    let response = tokio::task::spawn_blocking(move || run_tailor(&request, &base, &caps, today))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in tailoring: {e}")))??;

    Ok(Json(response))
}

/// POST /api/v1/tailor/job-terms
///
/// Previews the auto terms the engine would extract from a job post.
pub async fn handle_job_terms(
    State(state): State<AppState>,
    Json(request): Json<JobTermsRequest>,
) -> Result<Json<JobTermsResponse>, AppError> {
    if request.job_text.trim().is_empty() {
        return Err(AppError::Validation("job_text cannot be empty".to_string()));
    }

    let config = &state.tailor_config;
    let prefer = request.use_linguistic.unwrap_or(config.use_linguistic);
    let tokenizer = state.capabilities.tokenizer(prefer);
    let job_terms = top_terms_from_job(
        &request.job_text,
        &config.stopwords,
        config.terms.max_auto_terms,
        &tokenizer,
    );

    Ok(Json(JobTermsResponse {
        mode: tokenizer.mode(),
        job_terms,
    }))
}
