//! Tailor pipeline — from a base résumé and a pasted job post to the final
//! markdown and report.
//!
//! Flow: resolve job post → require title/company → per-run config →
//!       contact injection → parse → tailor → render → competencies →
//!       spacing rules → notes rules → frontmatter.
//!
//! Synchronous and CPU-bound; handlers run it inside `spawn_blocking`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::document::competencies::apply_reordered_competencies;
use crate::document::frontmatter::{
    inject_contact, make_contact_table, output_filenames, render_frontmatter, CONTACT_PLACEHOLDER,
};
use crate::document::markdown::{normalize_markdown_spacing, validate_markdown, MAX_MARKDOWN_ERRORS};
use crate::document::notes::{strip_notes, validate_notes_placement, MAX_NOTE_ERRORS};
use crate::document::parse::{finish, parse_professional_experience, render_with_new_roles};
use crate::errors::AppError;
use crate::jobpost::render::{jobpost_filename, render_jobpost_markdown};
use crate::jobpost::{company_stopwords, require_title_company, resolve_job_post};
use crate::models::job_post::JobPost;
use crate::tailoring::engine::{tailor, TailorReport};
use crate::tailoring::nlp::Capabilities;
use crate::tailoring::settings::TailorConfig;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct TailorRequest {
    pub resume_markdown: String,
    pub job_text: String,
    #[serde(default)]
    pub job_url: String,
    pub title: Option<String>,
    pub company: Option<String>,
    /// Label of the base résumé, written to the frontmatter.
    #[serde(default = "default_profile")]
    pub profile: String,
    /// Overrides the configured tokenizer preference for this run.
    pub use_linguistic: Option<bool>,
}

fn default_profile() -> String {
    "base".to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct TailorResponse {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub job_post: JobPost,
    pub jobpost_markdown: String,
    pub jobpost_filename: String,
    pub resume_filename: String,
    pub report_filename: String,
    pub markdown: String,
    pub report: TailorReport,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs one tailoring request against the shared base config. The base
/// config is never modified; per-run deltas go into a derived copy.
pub fn run_tailor(
    request: &TailorRequest,
    base: &TailorConfig,
    caps: &Capabilities,
    today: NaiveDate,
) -> Result<TailorResponse, AppError> {
    if request.resume_markdown.trim().is_empty() {
        return Err(AppError::Validation("resume_markdown cannot be empty".to_string()));
    }

    let post = resolve_job_post(
        &request.job_url,
        &request.job_text,
        request.title.as_deref(),
        request.company.as_deref(),
        today,
    );
    require_title_company(&post).map_err(|e| AppError::Validation(e.to_string()))?;

    let mut config = base.with_extra_stopwords(company_stopwords(&post.company));
    if let Some(prefer) = request.use_linguistic {
        config = config.with_linguistic(prefer);
    }

    let resume = with_contact(&request.resume_markdown, &config)?;
    let doc = parse_professional_experience(&resume);
    let (new_roles, report) = tailor(&doc, &post.description, &config, caps);

    let mut markdown = render_with_new_roles(&doc, &new_roles);
    if !report.core_competencies_reordered.is_empty() {
        let lines: Vec<String> = markdown.lines().map(str::to_string).collect();
        markdown = finish(&apply_reordered_competencies(
            &lines,
            &report.core_competencies_reordered,
        ));
    }

    let markdown = normalize_markdown_spacing(&markdown);
    check("Markdown validation failed", validate_markdown(&markdown), MAX_MARKDOWN_ERRORS)?;

    let markdown = strip_notes(&markdown);
    check("Note validation failed", validate_notes_placement(&markdown), MAX_NOTE_ERRORS)?;

    let markdown = render_frontmatter(&post, &request.profile) + &markdown;
    let (resume_filename, report_filename) =
        output_filenames(post.date_pulled, &post.company, &post.title);

    let run_id = Uuid::new_v4();
    info!(
        %run_id,
        company = %post.company,
        title = %post.title,
        mode = ?report.tokenizer_mode,
        "Tailored resume"
    );

    Ok(TailorResponse {
        run_id,
        generated_at: Utc::now(),
        jobpost_markdown: render_jobpost_markdown(&post),
        jobpost_filename: jobpost_filename(&post),
        job_post: post,
        resume_filename,
        report_filename,
        markdown,
        report,
    })
}

/// Replaces `{{CONTACT_LINE}}` with the configured contact table. Every
/// contact field is mandatory, and so is the placeholder.
fn with_contact(resume: &str, config: &TailorConfig) -> Result<String, AppError> {
    let contact = &config.contact;
    if !contact.is_complete() {
        return Err(AppError::Validation(
            "Contact info is mandatory: set email, location and phone under [contact]".to_string(),
        ));
    }
    let table = make_contact_table(&contact.email, &contact.location, &contact.phone);
    inject_contact(resume, &table).ok_or_else(|| {
        AppError::Validation(format!("Missing {CONTACT_PLACEHOLDER} placeholder in base resume"))
    })
}

/// Fails with the first `limit` errors listed one per line.
fn check(label: &str, errors: Vec<String>, limit: usize) -> Result<(), AppError> {
    if errors.is_empty() {
        return Ok(());
    }
    let listed: Vec<String> = errors.iter().take(limit).map(|e| format!("- {e}")).collect();
    Err(AppError::UnprocessableEntity(format!("{label}:\n{}", listed.join("\n"))))
}
