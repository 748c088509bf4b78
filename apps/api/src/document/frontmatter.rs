//! Contact table, YAML frontmatter and output file names.

use chrono::NaiveDate;

use crate::models::job_post::JobPost;

pub const CONTACT_PLACEHOLDER: &str = "{{CONTACT_LINE}}";

/// One-row, three-column table; empty when every field is blank.
pub fn make_contact_table(email: &str, location: &str, phone: &str) -> String {
    let (email, location, phone) = (email.trim(), location.trim(), phone.trim());
    if email.is_empty() && location.is_empty() && phone.is_empty() {
        return String::new();
    }
    format!("| {email} | {location} | {phone} |\n|:--|:--:|--:|\n")
}

/// Replaces the first placeholder with the table. `None` when the document
/// has no placeholder.
pub fn inject_contact(md: &str, table: &str) -> Option<String> {
    if !md.contains(CONTACT_PLACEHOLDER) {
        return None;
    }
    let replacement = format!("{}\n", table.trim_end());
    Some(md.replacen(CONTACT_PLACEHOLDER, &replacement, 1))
}

pub(crate) fn yaml_quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\\\""))
}

/// `---`-fenced YAML block followed by a blank line.
pub fn render_frontmatter(post: &JobPost, profile: &str) -> String {
    let date = post.date_pulled.format("%Y-%m-%d").to_string();
    let fields = [
        ("job_title", post.title.as_str()),
        ("company", post.company.as_str()),
        ("date_pulled", date.as_str()),
        ("source", post.source.as_str()),
        ("url", post.url.as_str()),
        ("profile", profile),
    ];
    let mut out = String::from("---\n");
    for (key, value) in fields {
        out.push_str(&format!("{key}: {}\n", yaml_quote(value)));
    }
    out.push_str("---\n\n");
    out
}

/// Lowercase, spaces to `_`, only `[a-z0-9_-]` kept, `_` runs collapsed,
/// leading and trailing `_`/`-` trimmed.
pub fn safe_slug(s: &str) -> String {
    let mut slug = String::new();
    for c in s.trim().to_lowercase().chars() {
        let c = if c == ' ' { '_' } else { c };
        if !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-') {
            continue;
        }
        if c == '_' && slug.ends_with('_') {
            continue;
        }
        slug.push(c);
    }
    slug.trim_matches(|c| c == '_' || c == '-').to_string()
}

/// `(résumé markdown, report json)` names for a run.
pub fn output_filenames(date: NaiveDate, company: &str, title: &str) -> (String, String) {
    let prefix = date.format("%Y-%m-%d");
    let slug = safe_slug(&format!("{company}_{title}"));
    (
        format!("{prefix}_resume_{slug}.md"),
        format!("{prefix}_report_{slug}.json"),
    )
}
