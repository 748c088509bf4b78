//! Axum route handlers for the Job Post API.

use axum::Json;
use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::jobpost::render::{jobpost_filename, render_jobpost_markdown};
use crate::jobpost::resolve_job_post;
use crate::models::job_post::JobPost;

#[derive(Debug, Deserialize)]
pub struct ParseJobPostRequest {
    #[serde(default)]
    pub url: String,
    pub text: String,
    pub title: Option<String>,
    pub company: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ParseJobPostResponse {
    #[serde(flatten)]
    pub job_post: JobPost,
    pub jobpost_markdown: String,
    pub jobpost_filename: String,
}

/// POST /api/v1/job-posts/parse
///
/// Parses a pasted job post without tailoring. Title and company may come
/// back empty; only the tailor endpoint requires them.
pub async fn handle_parse_job_post(
    Json(request): Json<ParseJobPostRequest>,
) -> Result<Json<ParseJobPostResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let post = resolve_job_post(
        &request.url,
        &request.text,
        request.title.as_deref(),
        request.company.as_deref(),
        Local::now().date_naive(),
    );
    info!(source = %post.source, company = %post.company, "Parsed job post");

    Ok(Json(ParseJobPostResponse {
        jobpost_markdown: render_jobpost_markdown(&post),
        jobpost_filename: jobpost_filename(&post),
        job_post: post,
    }))
}
