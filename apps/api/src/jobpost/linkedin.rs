//! Best-effort parse of a LinkedIn job page pasted as plain text.
//!
//! The header (everything before "About the job") usually starts with the
//! company and the title, followed by a ` · `-separated line such as
//! `Austin, TX · Hybrid · Full-time`. Layouts vary, so title and company may
//! come back empty.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::jobpost::SOURCE_LINKEDIN;
use crate::models::job_post::JobPost;

const ABOUT_MARKER: &str = "About the job";
const NOISE_EXACT: &[&str] = &["share", "show more options"];
const NOISE_CONTAINS: &[&str] = &["company logo"];
const MAX_LOCATION_CHARS: usize = 60;

pub fn parse_linkedin_job_post(url: &str, text: &str, today: NaiveDate) -> JobPost {
    let text = text.trim();
    let header = text.split_once(ABOUT_MARKER).map_or(text, |(before, _)| before);

    let cleaned: Vec<&str> = header
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !is_noise(l))
        .collect();

    let (company, title) = match cleaned.as_slice() {
        [company, title, ..] => (company.to_string(), title.to_string()),
        [title] => (String::new(), title.to_string()),
        [] => (String::new(), String::new()),
    };

    JobPost {
        url: url.trim().to_string(),
        source: SOURCE_LINKEDIN.to_string(),
        date_pulled: today,
        title,
        company,
        description: text.to_string(),
        attributes: header_attributes(&cleaned),
    }
}

fn is_noise(line: &str) -> bool {
    let lower = line.to_lowercase();
    NOISE_EXACT.contains(&lower.as_str()) || NOISE_CONTAINS.iter().any(|n| lower.contains(n))
}

/// Maps ` · ` segments of the first six header lines to `workplace_type`,
/// `employment_type` and `location`. Later workplace/employment segments
/// overwrite earlier ones; the first location wins.
fn header_attributes(cleaned: &[&str]) -> BTreeMap<String, String> {
    let mut attributes = BTreeMap::new();
    let segments = cleaned
        .iter()
        .take(6)
        .filter(|l| l.contains(" · "))
        .flat_map(|l| l.split(" · "))
        .map(str::trim)
        .filter(|s| !s.is_empty());

    for segment in segments {
        let lower = segment.to_lowercase();
        let has = |needles: &[&str]| needles.iter().any(|n| lower.contains(n));
        if has(&["remote", "hybrid", "on-site", "onsite"]) {
            attributes.insert("workplace_type".to_string(), segment.to_string());
        } else if has(&["full-time", "part-time", "contract", "temporary"]) {
            attributes.insert("employment_type".to_string(), segment.to_string());
        } else if segment.contains(',') && segment.chars().count() <= MAX_LOCATION_CHARS {
            attributes
                .entry("location".to_string())
                .or_insert_with(|| segment.to_string());
        }
    }
    attributes
}
