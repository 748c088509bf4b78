//! Job post markdown artifact: YAML frontmatter plus the description.

use crate::document::frontmatter::{safe_slug, yaml_quote};
use crate::models::job_post::JobPost;

/// `{YYYY-MM-DD}_{slug(company)}_{slug(title)}.md`
pub fn jobpost_filename(post: &JobPost) -> String {
    format!(
        "{}_{}_{}.md",
        post.date_pulled.format("%Y-%m-%d"),
        safe_slug(&post.company),
        safe_slug(&post.title)
    )
}

/// Frontmatter with title, company, date, source, url and the attributes in
/// key order, then `# Job Post` and the description.
pub fn render_jobpost_markdown(post: &JobPost) -> String {
    let date = post.date_pulled.format("%Y-%m-%d").to_string();
    let mut lines = vec![
        "---".to_string(),
        format!("title: {}", yaml_quote(&post.title)),
        format!("company: {}", yaml_quote(&post.company)),
        format!("date_pulled: {}", yaml_quote(&date)),
        format!("source: {}", yaml_quote(&post.source)),
        format!("url: {}", yaml_quote(&post.url)),
    ];

    if !post.attributes.is_empty() {
        lines.push("attributes:".to_string());
        lines.extend(
            post.attributes
                .iter()
                .map(|(key, value)| format!("  {key}: {}", yaml_quote(value))),
        );
    }

    lines.extend([
        "---".to_string(),
        String::new(),
        "# Job Post".to_string(),
        String::new(),
        post.description.trim_end().to_string(),
        String::new(),
    ]);
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn post() -> JobPost {
        let mut attributes = BTreeMap::new();
        attributes.insert("workplace_type".to_string(), "Remote".to_string());
        attributes.insert("location".to_string(), "Austin, TX".to_string());
        attributes.insert("employment_type".to_string(), "Full-time".to_string());
        JobPost {
            url: "https://www.linkedin.com/jobs/view/1".to_string(),
            source: "linkedin".to_string(),
            date_pulled: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            title: "Staff \"Data\" Engineer".to_string(),
            company: "Acme Corp".to_string(),
            description: "Build things.\n\n".to_string(),
            attributes,
        }
    }

    #[test]
    fn test_render_sorts_attributes_and_escapes_quotes() {
        assert_eq!(
            render_jobpost_markdown(&post()),
            "---\n\
             title: \"Staff \\\"Data\\\" Engineer\"\n\
             company: \"Acme Corp\"\n\
             date_pulled: \"2024-03-09\"\n\
             source: \"linkedin\"\n\
             url: \"https://www.linkedin.com/jobs/view/1\"\n\
             attributes:\n\
             \x20 employment_type: \"Full-time\"\n\
             \x20 location: \"Austin, TX\"\n\
             \x20 workplace_type: \"Remote\"\n\
             ---\n\
             \n\
             # Job Post\n\
             \n\
             Build things.\n"
        );
    }

    #[test]
    fn test_render_without_attributes_omits_block() {
        let mut post = post();
        post.attributes.clear();
        let md = render_jobpost_markdown(&post);
        assert!(!md.contains("attributes:"));
        assert!(md.contains("url: \"https://www.linkedin.com/jobs/view/1\"\n---\n\n# Job Post\n"));
    }

    #[test]
    fn test_filename_slugs_company_and_title() {
        assert_eq!(jobpost_filename(&post()), "2024-03-09_acme_corp_staff_data_engineer.md");
    }
}
