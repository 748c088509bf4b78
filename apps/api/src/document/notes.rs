//! Author notes: blockquotes under bullets and HTML comments. Both are
//! allowed inside `## SUMMARY` and stripped everywhere else.

use crate::document::parse::{finish, h2_title};

pub const MAX_NOTE_ERRORS: usize = 50;

const SUMMARY: &str = "summary";

fn is_blockquote(line: &str) -> bool {
    line.trim_start().starts_with('>')
}

fn is_html_comment(line: &str) -> bool {
    line.trim_start().starts_with("<!--")
}

fn is_list_item(line: &str) -> bool {
    line.starts_with("- ") || line.starts_with("* ")
}

pub fn strip_notes(md: &str) -> String {
    let mut in_summary = false;
    let kept: Vec<String> = md
        .lines()
        .filter(|line| {
            if let Some(title) = h2_title(line) {
                in_summary = title == SUMMARY;
                return true;
            }
            in_summary || !(is_blockquote(line) || is_html_comment(line))
        })
        .map(str::to_string)
        .collect();
    finish(&kept)
}

/// Outside the summary, a blockquote must follow a list item with at most
/// one blank line between, and no HTML comment may remain.
pub fn validate_notes_placement(md: &str) -> Vec<String> {
    let lines: Vec<&str> = md.lines().collect();
    let mut errors = Vec::new();
    let mut in_summary = false;

    for (i, line) in lines.iter().enumerate() {
        if let Some(title) = h2_title(line) {
            in_summary = title == SUMMARY;
            continue;
        }
        if in_summary {
            continue;
        }

        if is_blockquote(line) {
            let blanks = lines[..i]
                .iter()
                .rev()
                .take_while(|l| l.trim().is_empty())
                .count();
            if blanks > 1 {
                errors.push(format!(
                    "Line {}: blockquote is separated from bullet by >1 blank line.",
                    i + 1
                ));
            }
            let anchored = i
                .checked_sub(blanks + 1)
                .is_some_and(|j| is_list_item(lines[j]));
            if !anchored {
                errors.push(format!(
                    "Line {}: blockquote must follow a bullet ('- ' or '* ').",
                    i + 1
                ));
            }
            continue;
        }

        if is_html_comment(line) {
            errors.push(format!(
                "Line {}: HTML comment found outside SUMMARY (did stripping run?).",
                i + 1
            ));
        }
    }
    errors
}
