//! Job-Term Extractor — ranks salient terms of a job post for the "auto"
//! keyword signal.
//!
//! Simple mode ranks single tokens by frequency. Linguistic mode also chunks
//! `adjective* noun+` phrases and lists them ahead of the single terms.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::tailoring::nlp::{LinguisticBackend, PosTag, Tokenizer};
use crate::tailoring::text::{is_word, normalize};

/// Top `max_terms` auto terms for `job_text` using the given strategy.
pub fn top_terms_from_job(
    job_text: &str,
    stopwords: &BTreeSet<String>,
    max_terms: usize,
    tokenizer: &Tokenizer,
) -> Vec<String> {
    match tokenizer {
        Tokenizer::Simple => {
            let mut ranked = rank_by_frequency(tokenizer.tokens(job_text, stopwords));
            ranked.truncate(max_terms);
            ranked
        }
        Tokenizer::Linguistic(backend) => {
            let phrases = extract_noun_phrases(backend.as_ref(), job_text, stopwords);
            let singles = rank_by_frequency(tokenizer.tokens(job_text, stopwords));
            merge_terms(phrases, singles, max_terms)
        }
    }
}

/// Counts tokens longer than two chars and orders them by descending
/// (frequency, length); remaining ties keep first-seen order.
fn rank_by_frequency(tokens: Vec<String>) -> Vec<String> {
    let mut order: Vec<String> = Vec::new();
    let mut freq: HashMap<String, usize> = HashMap::new();
    for token in tokens {
        if token.chars().count() <= 2 {
            continue;
        }
        let count = freq.entry(token.clone()).or_insert(0);
        if *count == 0 {
            order.push(token);
        }
        *count += 1;
    }

    let mut ranked: Vec<(String, usize, usize)> = order
        .into_iter()
        .map(|t| {
            let f = freq[&t];
            let len = t.chars().count();
            (t, f, len)
        })
        .collect();
    ranked.sort_by(|a, b| (b.1, b.2).cmp(&(a.1, a.2)));
    ranked.into_iter().map(|(t, _, _)| t).collect()
}

/// Phrases first, then single terms; normalized, deduplicated, truncated.
fn merge_terms(phrases: Vec<String>, singles: Vec<String>, max_terms: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();
    for item in phrases.into_iter().chain(singles) {
        if out.len() >= max_terms {
            break;
        }
        let term = normalize(&item).trim().to_string();
        if term.is_empty() || !seen.insert(term.clone()) {
            continue;
        }
        out.push(term);
    }
    out
}

/// Noun phrases of 2–4 cleaned words, at least two of them three chars or
/// longer. Returned sorted and unique.
pub fn extract_noun_phrases(
    backend: &dyn LinguisticBackend,
    job_text: &str,
    stopwords: &BTreeSet<String>,
) -> Vec<String> {
    let tagged = backend.tag(&normalize(job_text));
    let mut phrases = BTreeSet::new();

    for chunk in chunk_noun_phrases(&tagged) {
        let cleaned: Vec<String> = chunk
            .iter()
            .map(|w| w.to_lowercase())
            .filter(|w| is_word(w) && !stopwords.contains(w))
            .collect();
        if !(2..=4).contains(&cleaned.len()) {
            continue;
        }
        if cleaned.iter().filter(|w| w.chars().count() >= 3).count() >= 2 {
            phrases.insert(cleaned.join(" "));
        }
    }
    phrases.into_iter().collect()
}

/// Greedy left-to-right `adjective* noun+` chunker.
fn chunk_noun_phrases(tagged: &[(String, PosTag)]) -> Vec<Vec<&str>> {
    let mut chunks = Vec::new();
    let mut i = 0;
    while i < tagged.len() {
        let mut j = i;
        while j < tagged.len() && tagged[j].1 == PosTag::Adjective {
            j += 1;
        }
        let mut k = j;
        while k < tagged.len() && tagged[k].1 == PosTag::Noun {
            k += 1;
        }
        if k > j {
            chunks.push(tagged[i..k].iter().map(|(w, _)| w.as_str()).collect());
            i = k;
        } else {
            i += 1;
        }
    }
    chunks
}
