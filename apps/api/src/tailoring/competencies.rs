//! Competency Reorderer — re-ranks the core-competencies block by relevance.

use crate::tailoring::nlp::Tokenizer;
use crate::tailoring::scoring::{score_competency, JobContext};
use crate::tailoring::settings::TailorConfig;

/// Items sorted by descending competency score; ties keep their order.
/// An empty list stays empty.
pub fn reorder_competencies(
    items: &[String],
    job: &JobContext,
    config: &TailorConfig,
    tokenizer: &Tokenizer,
) -> Vec<String> {
    let mut scored: Vec<(f64, &String)> = items
        .iter()
        .map(|item| (score_competency(item, job, config, tokenizer), item))
        .collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored.into_iter().map(|(_, item)| item.clone()).collect()
}
