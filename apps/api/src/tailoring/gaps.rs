//! Gap Reporter — job keywords the résumé never mentions.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::tailoring::settings::TailorConfig;
use crate::tailoring::text::normalize;

/// Where a candidate keyword came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordSource {
    Required,
    Domain,
    NiceToHave,
    Auto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingKeyword {
    pub keyword: String,
    pub source: KeywordSource,
    /// Occurrences in the normalized job text.
    pub job_count: usize,
}

/// Candidates are merged from required, domain, nice-to-have and auto terms
/// (first occurrence wins). A candidate is missing when it is not a substring
/// of the normalized résumé. Ranked by job occurrences, then keyword length,
/// both descending.
pub fn missing_keywords(
    resume_text: &str,
    job_text: &str,
    config: &TailorConfig,
    auto_terms: &[String],
) -> Vec<MissingKeyword> {
    let resume_norm = normalize(resume_text);
    let job_norm = normalize(job_text);

    let sources = [
        (KeywordSource::Required, &config.terms.required[..]),
        (KeywordSource::Domain, &config.terms.domain[..]),
        (KeywordSource::NiceToHave, &config.terms.nice_to_have[..]),
        (KeywordSource::Auto, auto_terms),
    ];

    let mut seen = HashSet::new();
    let mut missing: Vec<MissingKeyword> = sources
        .iter()
        .flat_map(|(source, terms)| terms.iter().map(move |t| (*source, t)))
        .filter_map(|(source, term)| {
            let keyword = normalize(term).trim().to_string();
            if keyword.is_empty() || !seen.insert(keyword.clone()) {
                return None;
            }
            if resume_norm.contains(&keyword) {
                return None;
            }
            let job_count = job_norm.matches(keyword.as_str()).count();
            Some(MissingKeyword {
                keyword,
                source,
                job_count,
            })
        })
        .collect();

    missing.sort_by(|a, b| {
        (b.job_count, b.keyword.chars().count()).cmp(&(a.job_count, a.keyword.chars().count()))
    });
    missing
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn keywords(list: &[MissingKeyword]) -> Vec<&str> {
        list.iter().map(|m| m.keyword.as_str()).collect()
    }

    #[test]
    fn test_present_keywords_are_not_reported() {
        let mut config = TailorConfig::default();
        config.terms.required = owned(&["SQL", "Terraform"]);
        let missing = missing_keywords("- Wrote SQL daily", "sql and terraform", &config, &[]);
        assert_eq!(keywords(&missing), vec!["terraform"]);
        assert_eq!(missing[0].source, KeywordSource::Required);
    }

    #[test]
    fn test_ranked_by_job_count_then_length() {
        let mut config = TailorConfig::default();
        config.terms.nice_to_have = owned(&["go", "kafka", "flink"]);
        let auto = owned(&["stream processing"]);
        let job = "kafka kafka go go flink stream processing";
        let missing = missing_keywords("", job, &config, &auto);
        assert_eq!(keywords(&missing), vec!["kafka", "go", "stream processing", "flink"]);
        assert_eq!(missing[0].job_count, 2);
    }

    #[test]
    fn test_duplicates_keep_first_source() {
        let mut config = TailorConfig::default();
        config.terms.domain = owned(&["Payments"]);
        let missing = missing_keywords("", "payments", &config, &owned(&["payments"]));
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].source, KeywordSource::Domain);
    }

    #[test]
    fn test_empty_job_still_lists_configured_terms() {
        let mut config = TailorConfig::default();
        config.terms.required = owned(&["rust"]);
        let missing = missing_keywords("python", "", &config, &[]);
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].job_count, 0);
    }
}
