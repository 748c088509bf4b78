//! Professional-experience section: parse into roles, render new roles back.

use crate::models::resume::{ResumeDoc, Role};

const SECTION_TITLE: &str = "professional_experience";

/// Title of a `## ` header, trimmed and lowercased.
pub(crate) fn h2_title(line: &str) -> Option<String> {
    line.strip_prefix("## ").map(|t| t.trim().to_lowercase())
}

/// Splits the document into lines and collects the roles of the
/// `## PROFESSIONAL_EXPERIENCE` section. Lines before the first `### ` in
/// the section belong to no role.
pub fn parse_professional_experience(md: &str) -> ResumeDoc {
    let lines: Vec<String> = md.lines().map(str::to_string).collect();

    let Some(start) = lines
        .iter()
        .position(|l| h2_title(l).as_deref() == Some(SECTION_TITLE))
    else {
        return ResumeDoc {
            lines,
            ..ResumeDoc::default()
        };
    };
    let end = lines[start + 1..]
        .iter()
        .position(|l| l.starts_with("## "))
        .map(|offset| start + 1 + offset);

    let mut roles = Vec::new();
    let mut current: Option<Role> = None;
    for line in &lines[start..end.unwrap_or(lines.len())] {
        if line.starts_with("### ") {
            roles.extend(current.take());
            current = Some(Role::new(line.clone()));
            continue;
        }
        let Some(role) = current.as_mut() else {
            continue;
        };
        if line.starts_with("#### ") {
            role.company_header = Some(line.clone());
        } else if line.starts_with("- ") {
            role.bullet_lines.push(line.clone());
        } else {
            role.other_lines.push(line.clone());
        }
    }
    roles.extend(current);

    ResumeDoc {
        lines,
        prof_exp_start: Some(start),
        prof_exp_end: end,
        roles,
    }
}

/// Splices `roles` into the document in place of the original section body.
///
/// Each role renders as header, sub-header, non-blank other lines, bullets,
/// then one blank line. Without a section the document comes back unchanged
/// apart from trailing whitespace.
pub fn render_with_new_roles(doc: &ResumeDoc, roles: &[Role]) -> String {
    let Some(start) = doc.prof_exp_start else {
        return finish(&doc.lines);
    };
    let end = doc.prof_exp_end.unwrap_or(doc.lines.len());

    let mut out: Vec<String> = doc.lines[..=start].to_vec();
    out.extend(
        doc.lines[start + 1..end]
            .iter()
            .take_while(|l| !l.starts_with("### "))
            .cloned(),
    );

    for role in roles {
        out.push(role.role_header.clone());
        out.extend(role.company_header.iter().cloned());
        out.extend(role.other_lines.iter().filter(|l| !l.trim().is_empty()).cloned());
        out.extend(role.bullet_lines.iter().cloned());
        out.push(String::new());
    }
    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }

    out.extend(doc.lines[end..].iter().cloned());
    finish(&out)
}

/// Joins lines, trims trailing whitespace and ends with a single newline.
pub(crate) fn finish(lines: &[String]) -> String {
    let mut text = lines.join("\n").trim_end().to_string();
    text.push('\n');
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "\
# Jane Doe

## SUMMARY
Builder.

## PROFESSIONAL_EXPERIENCE
Intro line
### Staff Engineer
#### Acme Corp
Remote, 2020-2024
- Led migration
- Helped with onboarding

### Engineer
- Built pipelines
## EDUCATION
- BSc
";

    #[test]
    fn test_parse_finds_section_and_roles() {
        let doc = parse_professional_experience(RESUME);
        assert_eq!(doc.prof_exp_start, Some(5));
        assert_eq!(doc.prof_exp_end, Some(15));
        assert_eq!(doc.roles.len(), 2);

        let first = &doc.roles[0];
        assert_eq!(first.role_header, "### Staff Engineer");
        assert_eq!(first.company_header.as_deref(), Some("#### Acme Corp"));
        assert_eq!(first.bullet_lines, vec!["- Led migration", "- Helped with onboarding"]);
        assert_eq!(first.other_lines, vec!["Remote, 2020-2024", ""]);

        let second = &doc.roles[1];
        assert_eq!(second.company_header, None);
        assert_eq!(second.bullet_lines, vec!["- Built pipelines"]);
    }

    #[test]
    fn test_section_header_is_case_insensitive() {
        let doc = parse_professional_experience("## Professional_Experience \n### Role\n- a\n");
        assert_eq!(doc.prof_exp_start, Some(0));
        assert_eq!(doc.prof_exp_end, None);
        assert_eq!(doc.roles[0].bullet_lines, vec!["- a"]);
    }

    #[test]
    fn test_missing_section_yields_no_roles() {
        let doc = parse_professional_experience("# Name\n## SKILLS\n- Rust\n");
        assert_eq!(doc.prof_exp_start, None);
        assert!(doc.roles.is_empty());
        assert_eq!(render_with_new_roles(&doc, &[]), "# Name\n## SKILLS\n- Rust\n");
    }

    #[test]
    fn test_render_replaces_section_body() {
        let doc = parse_professional_experience(RESUME);
        let roles = vec![
            doc.roles[0].with_bullets(vec!["- Led migration".to_string()]),
            doc.roles[1].clone(),
        ];
        let rendered = render_with_new_roles(&doc, &roles);
        let expected = "\
# Jane Doe

## SUMMARY
Builder.

## PROFESSIONAL_EXPERIENCE
Intro line
### Staff Engineer
#### Acme Corp
Remote, 2020-2024
- Led migration

### Engineer
- Built pipelines
## EDUCATION
- BSc
";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_render_with_no_roles_keeps_header_and_preamble() {
        let doc = parse_professional_experience(RESUME);
        let rendered = render_with_new_roles(&doc, &[]);
        assert!(rendered.contains("## PROFESSIONAL_EXPERIENCE\nIntro line\n## EDUCATION"));
    }
}
