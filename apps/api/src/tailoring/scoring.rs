//! Bullet Scorer — weighted multi-signal relevance of one bullet against a
//! job post.
//!
//! score = w_overlap·overlap + w_required·required_hits + w_nice·nice_hits
//!       + w_domain·domain_hits + 0.6·w_overlap·auto_hits + w_metric·metric
//!       + w_action_verb·action_verb − w_generic_penalty·generic_penalty
//!       − w_length_penalty·length_penalty
//!
//! Pure: the same inputs always give the same score and breakdown.

use std::collections::HashSet;

use serde::{Deserialize, Serialize, Serializer};

use crate::tailoring::job_terms::top_terms_from_job;
use crate::tailoring::nlp::Tokenizer;
use crate::tailoring::settings::TailorConfig;
use crate::tailoring::text::{
    count_phrases_in, exceeds_length, has_metric, is_generic, normalize, starts_with_action_verb,
};

/// Auto-term hits weigh this fraction of `w_overlap` for bullets.
const AUTO_HIT_FACTOR: f64 = 0.6;
/// ...and this fraction for competency items.
const COMPETENCY_AUTO_HIT_FACTOR: f64 = 0.5;

/// Everything about the job post that scoring needs, computed once per run.
#[derive(Debug, Clone)]
pub struct JobContext {
    pub normalized: String,
    pub tokens: HashSet<String>,
    pub auto_terms: Vec<String>,
}

impl JobContext {
    /// Tokenizes the job text and extracts its auto terms.
    pub fn new(job_text: &str, config: &TailorConfig, tokenizer: &Tokenizer) -> Self {
        let auto_terms = top_terms_from_job(
            job_text,
            &config.stopwords,
            config.terms.max_auto_terms,
            tokenizer,
        );
        Self::with_auto_terms(job_text, config, tokenizer, auto_terms)
    }

    pub fn with_auto_terms(
        job_text: &str,
        config: &TailorConfig,
        tokenizer: &Tokenizer,
        auto_terms: Vec<String>,
    ) -> Self {
        Self {
            normalized: normalize(job_text),
            tokens: tokenizer.token_set(job_text, &config.stopwords),
            auto_terms,
        }
    }
}

/// Per-signal diagnostics for one bullet. Flags are 0 or 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub overlap: usize,
    pub required_hits: usize,
    pub nice_hits: usize,
    pub domain_hits: usize,
    pub auto_hits: usize,
    pub metric: u8,
    pub action_verb: u8,
    pub generic_penalty: u8,
    pub length_penalty: u8,
}

/// A bullet with its score. `index` is its position in the role.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredBullet {
    #[serde(skip)]
    pub index: usize,
    #[serde(serialize_with = "round_score")]
    pub score: f64,
    pub bullet: String,
    pub details: ScoreBreakdown,
}

fn round_score<S: Serializer>(score: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64((score * 1000.0).round() / 1000.0)
}

/// Scores one bullet against a prepared job context. The context carries
/// the job text (normalized and tokenized) and the auto terms.
pub fn score_bullet(
    bullet: &str,
    job: &JobContext,
    config: &TailorConfig,
    tokenizer: &Tokenizer,
) -> (f64, ScoreBreakdown) {
    let b = bullet.trim();
    let b_norm = normalize(b);
    let w = &config.weights;

    let details = ScoreBreakdown {
        overlap: overlap(b, job, config, tokenizer),
        required_hits: count_phrases_in(&b_norm, &config.terms.required),
        nice_hits: count_phrases_in(&b_norm, &config.terms.nice_to_have),
        domain_hits: count_phrases_in(&b_norm, &config.terms.domain),
        auto_hits: auto_hits(&b_norm, &job.auto_terms),
        metric: has_metric(b).into(),
        action_verb: starts_with_action_verb(b, &config.action_verbs).into(),
        generic_penalty: is_generic(b, &config.generic_penalties).into(),
        length_penalty: exceeds_length(b).into(),
    };

    let mut score = 0.0;
    score += w.w_overlap * details.overlap as f64;
    score += w.w_required * details.required_hits as f64;
    score += w.w_nice * details.nice_hits as f64;
    score += w.w_domain * details.domain_hits as f64;
    score += (w.w_overlap * AUTO_HIT_FACTOR) * details.auto_hits as f64;
    score += w.w_metric * f64::from(details.metric);
    score += w.w_action_verb * f64::from(details.action_verb);
    score -= w.w_generic_penalty * f64::from(details.generic_penalty);
    score -= w.w_length_penalty * f64::from(details.length_penalty);

    (score, details)
}

/// Reduced-signal score for short skill items: overlap, phrase hits and a
/// half-weight auto-term signal. No metric, verb or penalty signals.
pub fn score_competency(
    item: &str,
    job: &JobContext,
    config: &TailorConfig,
    tokenizer: &Tokenizer,
) -> f64 {
    let norm = normalize(item);
    let w = &config.weights;

    let mut score = 0.0;
    score += w.w_overlap * overlap(item, job, config, tokenizer) as f64;
    score += w.w_required * count_phrases_in(&norm, &config.terms.required) as f64;
    score += w.w_nice * count_phrases_in(&norm, &config.terms.nice_to_have) as f64;
    score += w.w_domain * count_phrases_in(&norm, &config.terms.domain) as f64;
    score += (w.w_overlap * COMPETENCY_AUTO_HIT_FACTOR) * auto_hits(&norm, &job.auto_terms) as f64;
    score
}

fn overlap(text: &str, job: &JobContext, config: &TailorConfig, tokenizer: &Tokenizer) -> usize {
    tokenizer
        .token_set(text, &config.stopwords)
        .intersection(&job.tokens)
        .count()
}

/// Auto terms arrive normalized from the extractor.
fn auto_hits(normalized: &str, auto_terms: &[String]) -> usize {
    auto_terms
        .iter()
        .filter(|term| normalized.contains(term.as_str()))
        .count()
}

/// Descending by score; ties keep their current order.
pub fn sort_by_score_desc(bullets: &mut [ScoredBullet]) {
    bullets.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TailorConfig {
        TailorConfig {
            stopwords: ["the", "of", "with", "and", "a", "for"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            ..TailorConfig::default()
        }
    }

    fn score(bullet: &str, job_text: &str, cfg: &TailorConfig) -> (f64, ScoreBreakdown) {
        let tokenizer = Tokenizer::Simple;
        let job = JobContext::new(job_text, cfg, &tokenizer);
        score_bullet(bullet, &job, cfg, &tokenizer)
    }

    #[test]
    fn test_breakdown_counts_every_signal() {
        let mut cfg = config();
        cfg.terms.required = vec!["billing".to_string()];
        cfg.terms.domain = vec!["payments".to_string()];
        cfg.terms.nice_to_have = vec!["kafka".to_string()];

        let (_, d) = score(
            "- Led migration of billing system to payments stack, saving $2M",
            "We need a billing migration lead",
            &cfg,
        );
        assert_eq!(d.overlap, 2); // billing, migration ("led" is not "lead")
        assert_eq!(d.required_hits, 1);
        assert_eq!(d.domain_hits, 1);
        assert_eq!(d.nice_hits, 0);
        assert_eq!(d.metric, 1);
        assert_eq!(d.action_verb, 1);
        assert_eq!(d.generic_penalty, 0);
        assert_eq!(d.length_penalty, 0);
    }

    #[test]
    fn test_score_is_weighted_sum() {
        let cfg = config();
        let tokenizer = Tokenizer::Simple;
        let job = JobContext::with_auto_terms("migration", &cfg, &tokenizer, vec!["migration".to_string()]);
        let (s, d) = score_bullet("- Led migration", &job, &cfg, &tokenizer);
        assert_eq!(d.overlap, 1);
        assert_eq!(d.auto_hits, 1);
        let expected = 0.12 + 0.12 * 0.6 + 0.75;
        assert!((s - expected).abs() < 1e-9, "score was {s}");
    }

    #[test]
    fn test_generic_and_length_penalties_subtract() {
        let cfg = config();
        let long = format!("- Helped {}", "x".repeat(250));
        let (s, d) = score(&long, "", &cfg);
        assert_eq!(d.generic_penalty, 1);
        assert_eq!(d.length_penalty, 1);
        assert_eq!(d.action_verb, 0);
        assert!((s - (-1.4)).abs() < 1e-9, "score was {s}");
    }

    #[test]
    fn test_empty_job_text_zeroes_overlap_and_auto_hits() {
        let mut cfg = config();
        cfg.terms.required = vec!["sql".to_string()];
        let (s, d) = score("- Built SQL reports covering 12 regions", "", &cfg);
        assert_eq!(d.overlap, 0);
        assert_eq!(d.auto_hits, 0);
        assert_eq!(d.required_hits, 1);
        assert!((s - (3.0 + 1.5 + 0.75)).abs() < 1e-9);
    }

    #[test]
    fn test_more_overlap_never_lowers_score() {
        let cfg = config();
        let bullet = "- Designed kafka pipeline";
        let (low, _) = score(bullet, "kafka", &cfg);
        let (high, _) = score(bullet, "kafka pipeline", &cfg);
        assert!(high >= low);
    }

    #[test]
    fn test_score_bullet_is_deterministic() {
        let cfg = config();
        let a = score("- Built pipeline", "pipeline work", &cfg);
        let b = score("- Built pipeline", "pipeline work", &cfg);
        assert_eq!(a, b);
    }

    #[test]
    fn test_competency_uses_reduced_signals() {
        let cfg = config();
        let tokenizer = Tokenizer::Simple;
        let job = JobContext::with_auto_terms(
            "kubernetes kubernetes",
            &cfg,
            &tokenizer,
            vec!["kubernete".to_string()],
        );
        let s = score_competency("- Kubernetes", &job, &cfg, &tokenizer);
        assert!((s - (0.12 + 0.06)).abs() < 1e-9, "score was {s}");
        assert_eq!(score_competency("- $5M budgets", &job, &cfg, &tokenizer), 0.0);
    }

    #[test]
    fn test_scores_serialize_rounded() {
        let b = ScoredBullet {
            index: 4,
            score: 1.234_56,
            bullet: "- x".to_string(),
            details: ScoreBreakdown::default(),
        };
        let json = serde_json::to_value(&b).unwrap();
        assert_eq!(json["score"], serde_json::json!(1.235));
        assert!(json.get("index").is_none());
    }
}
