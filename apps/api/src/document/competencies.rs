//! The `## CORE_COMPETENCIES` block: a flat list of `- ` skill items.

use crate::document::parse::h2_title;

const SECTION_TITLE: &str = "core_competencies";

/// Location and items of the competencies block. `start` is the header line;
/// `end` is the next `## ` header or the line count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompetencyBlock {
    pub start: Option<usize>,
    pub end: Option<usize>,
    pub items: Vec<String>,
}

pub fn extract_core_competencies(lines: &[String]) -> CompetencyBlock {
    let Some(start) = lines
        .iter()
        .position(|l| h2_title(l).as_deref() == Some(SECTION_TITLE))
    else {
        return CompetencyBlock::default();
    };
    let end = lines[start + 1..]
        .iter()
        .position(|l| l.starts_with("## "))
        .map_or(lines.len(), |offset| start + 1 + offset);

    CompetencyBlock {
        start: Some(start),
        end: Some(end),
        items: lines[start + 1..end]
            .iter()
            .filter(|l| l.starts_with("- "))
            .cloned()
            .collect(),
    }
}

/// Replaces the block body with `reordered`. Non-item lines in the body are
/// dropped. No-op when `reordered` is empty or the block is missing.
pub fn apply_reordered_competencies(lines: &[String], reordered: &[String]) -> Vec<String> {
    let block = extract_core_competencies(lines);
    let (Some(start), Some(end)) = (block.start, block.end) else {
        return lines.to_vec();
    };
    if reordered.is_empty() {
        return lines.to_vec();
    }

    let mut out = lines[..=start].to_vec();
    out.extend(reordered.iter().cloned());
    out.extend(lines[end..].iter().cloned());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(str::to_string).collect()
    }

    #[test]
    fn test_extract_items_and_bounds() {
        let doc = lines("# Name\n## Core_Competencies\n- Python\nnote\n- SQL\n## SKILLS\n- x");
        let block = extract_core_competencies(&doc);
        assert_eq!(block.start, Some(1));
        assert_eq!(block.end, Some(5));
        assert_eq!(block.items, vec!["- Python", "- SQL"]);
    }

    #[test]
    fn test_block_runs_to_end_of_document() {
        let block = extract_core_competencies(&lines("## CORE_COMPETENCIES\n- Go"));
        assert_eq!(block.end, Some(2));
        assert_eq!(block.items, vec!["- Go"]);
    }

    #[test]
    fn test_missing_block() {
        assert_eq!(extract_core_competencies(&lines("## SUMMARY\n- x")), CompetencyBlock::default());
    }

    #[test]
    fn test_apply_replaces_block_body() {
        let doc = lines("## CORE_COMPETENCIES\n- Python\n- Kubernetes\n## EDUCATION");
        let reordered = lines("- Kubernetes\n- Python");
        assert_eq!(
            apply_reordered_competencies(&doc, &reordered),
            lines("## CORE_COMPETENCIES\n- Kubernetes\n- Python\n## EDUCATION")
        );
    }

    #[test]
    fn test_apply_is_noop_without_items_or_block() {
        let doc = lines("## CORE_COMPETENCIES\n- Python");
        assert_eq!(apply_reordered_competencies(&doc, &[]), doc);
        let other = lines("## SUMMARY\n- x");
        assert_eq!(apply_reordered_competencies(&other, &lines("- y")), other);
    }
}
