//! Text primitives shared by every matcher in the tailoring engine.
//!
//! All comparisons run on the output of [`normalize`]: two strings carry the
//! same content only once both are lowercased and their en/em dashes folded
//! to `-`. Phrase checks are plain substring checks on normalized text, not
//! token-boundary aware, so `"sql"` hits `"postgresql"`.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

/// Raw bullets longer than this (in chars) take the length penalty.
pub const MAX_BULLET_CHARS: usize = 240;

static WORD_RE: OnceLock<Regex> = OnceLock::new();
static WORD_FULL_RE: OnceLock<Regex> = OnceLock::new();
static METRIC_RE: OnceLock<Regex> = OnceLock::new();

fn word_regex() -> &'static Regex {
    WORD_RE.get_or_init(|| Regex::new(r"[a-zA-Z][a-zA-Z0-9\-+/]*").expect("word regex"))
}

fn metric_regex() -> &'static Regex {
    METRIC_RE.get_or_init(|| {
        Regex::new(r"(?i)(\$?\d[\d,]*)(\.\d+)?\s*(%|k|m|b|arr|mrr)?\b").expect("metric regex")
    })
}

/// True when the whole string is one word-like run (letter first, then
/// letters, digits, `-`, `+` or `/`).
pub fn is_word(s: &str) -> bool {
    WORD_FULL_RE
        .get_or_init(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9\-+/]*$").expect("full word regex"))
        .is_match(s)
}

/// Canonical form used for every content comparison.
pub fn normalize(text: &str) -> String {
    text.to_lowercase().replace(['\u{2013}', '\u{2014}'], "-")
}

/// Normalizes a configured phrase; `None` when nothing is left to match.
pub fn normalize_phrase(phrase: &str) -> Option<String> {
    let p = normalize(phrase);
    let p = p.trim();
    (!p.is_empty()).then(|| p.to_string())
}

/// Strips a trailing `s` from tokens longer than four chars, unless the
/// singular is itself a stopword.
pub fn depluralize(token: &str, stopwords: &BTreeSet<String>) -> String {
    if token.chars().count() > 4 {
        if let Some(singular) = token.strip_suffix('s') {
            if !singular.is_empty() && !stopwords.contains(singular) {
                return singular.to_string();
            }
        }
    }
    token.to_string()
}

/// Simple-mode tokenizer. Has no external dependency and is always available.
pub fn tokenize_simple(text: &str, stopwords: &BTreeSet<String>) -> Vec<String> {
    let norm = normalize(text);
    word_regex()
        .find_iter(&norm)
        .filter_map(|m| {
            let word = m.as_str().trim_matches(|c| matches!(c, '-' | '+' | '/'));
            if word.is_empty() || stopwords.contains(word) {
                return None;
            }
            Some(depluralize(word, stopwords))
        })
        .collect()
}

/// Number of configured phrases found as substrings of already-normalized
/// text. Blank phrases never match.
pub fn count_phrases_in(normalized: &str, phrases: &[String]) -> usize {
    phrases
        .iter()
        .filter_map(|p| normalize_phrase(p))
        .filter(|p| normalized.contains(p.as_str()))
        .count()
}

/// True when any non-empty phrase occurs in the already-normalized text.
pub fn mentions_any<'a, I>(normalized: &str, phrases: I) -> bool
where
    I: IntoIterator<Item = &'a String>,
{
    phrases
        .into_iter()
        .filter_map(|p| normalize_phrase(p))
        .any(|p| normalized.contains(p.as_str()))
}

/// Numeric, percentage, currency or `k/m/b/arr/mrr` unit pattern.
pub fn has_metric(bullet: &str) -> bool {
    metric_regex().is_match(bullet)
}

/// First word of the bullet, with the list marker and trailing `,:;.` removed.
pub fn first_word(bullet: &str) -> String {
    let norm = normalize(bullet);
    let body = norm.trim_start_matches('-').trim();
    body.split(' ')
        .next()
        .unwrap_or("")
        .trim_matches(|c| matches!(c, ',' | ':' | ';' | '.'))
        .to_string()
}

pub fn starts_with_action_verb(bullet: &str, verbs: &BTreeSet<String>) -> bool {
    verbs.contains(&first_word(bullet))
}

/// True when the bullet contains any generic filler phrase.
pub fn is_generic(bullet: &str, generic_phrases: &BTreeSet<String>) -> bool {
    let norm = normalize(bullet);
    mentions_any(&norm, generic_phrases)
}

pub fn exceeds_length(bullet: &str) -> bool {
    bullet.chars().count() > MAX_BULLET_CHARS
}
