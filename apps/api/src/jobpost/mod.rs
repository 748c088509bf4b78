//! Job post capture: source detection, LinkedIn paste parsing, overrides
//! and the required-field check.

pub mod handlers;
pub mod linkedin;
pub mod render;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use thiserror::Error;

use crate::models::job_post::JobPost;

pub const SOURCE_LINKEDIN: &str = "linkedin";
pub const SOURCE_OTHER: &str = "other";

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Missing required fields: {}", .missing.join(", "))]
pub struct MissingFieldsError {
    pub missing: Vec<&'static str>,
}

static LINKEDIN_HOST_RE: OnceLock<Regex> = OnceLock::new();

fn linkedin_host_regex() -> &'static Regex {
    LINKEDIN_HOST_RE.get_or_init(|| {
        Regex::new(r"(?i)(^|https?://)(www\.)?linkedin\.com/").expect("linkedin host regex")
    })
}

pub fn is_linkedin_url(url: &str) -> bool {
    linkedin_host_regex().is_match(url.trim())
}

/// Parses the pasted text according to its source, then applies non-empty
/// `title` / `company` overrides.
pub fn resolve_job_post(
    url: &str,
    text: &str,
    title: Option<&str>,
    company: Option<&str>,
    today: NaiveDate,
) -> JobPost {
    let mut post = if is_linkedin_url(url) {
        linkedin::parse_linkedin_job_post(url, text, today)
    } else {
        JobPost {
            url: url.trim().to_string(),
            source: SOURCE_OTHER.to_string(),
            date_pulled: today,
            title: String::new(),
            company: String::new(),
            description: text.trim().to_string(),
            attributes: BTreeMap::new(),
        }
    };

    if let Some(title) = title.map(str::trim).filter(|t| !t.is_empty()) {
        post.title = title.to_string();
    }
    if let Some(company) = company.map(str::trim).filter(|c| !c.is_empty()) {
        post.company = company.to_string();
    }
    post
}

/// Tailoring needs both a company and a title.
pub fn require_title_company(post: &JobPost) -> Result<(), MissingFieldsError> {
    let mut missing = Vec::new();
    if post.company.trim().is_empty() {
        missing.push("company");
    }
    if post.title.trim().is_empty() {
        missing.push("title");
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(MissingFieldsError { missing })
    }
}

/// Words of the company name (three chars or more) plus the whole name, so
/// the employer's own name never counts as a job keyword.
pub fn company_stopwords(company: &str) -> BTreeSet<String> {
    let lower = company.to_lowercase();
    let mut out: BTreeSet<String> = lower
        .split(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit()))
        .filter(|part| part.len() >= 3)
        .map(str::to_string)
        .collect();
    let whole = lower.trim();
    if !whole.is_empty() {
        out.insert(whole.to_string());
    }
    out
}
