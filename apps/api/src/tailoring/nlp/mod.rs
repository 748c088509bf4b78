//! Tokenizer strategies and the optional linguistic backend.
//!
//! `Capabilities` is built once at startup and handed to every caller that
//! tokenizes. Asking for the linguistic strategy when no backend is present
//! silently yields the simple strategy; there is no global availability flag.

#[cfg(feature = "linguistic")]
pub mod rules;

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::tailoring::text::{depluralize, is_word, normalize, tokenize_simple};

/// Coarse part-of-speech tag. Only the distinctions the lemmatizer and the
/// noun-phrase chunker care about are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PosTag {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Other,
}

/// A part-of-speech tagger plus tag-aware lemmatizer.
pub trait LinguisticBackend: Send + Sync {
    /// Splits `text` into word and punctuation tokens and tags each one.
    fn tag(&self, text: &str) -> Vec<(String, PosTag)>;

    /// Base form of `word` read as `tag`.
    fn lemmatize(&self, word: &str, tag: PosTag) -> String;

    fn name(&self) -> &'static str;
}

/// Which tokenization strategy a run actually uses.
#[derive(Clone)]
pub enum Tokenizer {
    Simple,
    Linguistic(Arc<dyn LinguisticBackend>),
}

impl fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tokenizer::Simple => f.write_str("Tokenizer::Simple"),
            Tokenizer::Linguistic(backend) => write!(f, "Tokenizer::Linguistic({})", backend.name()),
        }
    }
}

impl Tokenizer {
    pub fn mode(&self) -> TokenizerMode {
        match self {
            Tokenizer::Simple => TokenizerMode::Simple,
            Tokenizer::Linguistic(_) => TokenizerMode::Linguistic,
        }
    }

    pub fn tokens(&self, text: &str, stopwords: &BTreeSet<String>) -> Vec<String> {
        match self {
            Tokenizer::Simple => tokenize_simple(text, stopwords),
            Tokenizer::Linguistic(backend) => tokenize_linguistic(backend.as_ref(), text, stopwords),
        }
    }

    /// Tokens as a set; duplicates collapse and order is irrelevant.
    pub fn token_set(&self, text: &str, stopwords: &BTreeSet<String>) -> HashSet<String> {
        self.tokens(text, stopwords).into_iter().collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenizerMode {
    Simple,
    Linguistic,
}

/// Linguistic-mode tokenizer: tag, lemmatize by tag, then filter.
fn tokenize_linguistic(
    backend: &dyn LinguisticBackend,
    text: &str,
    stopwords: &BTreeSet<String>,
) -> Vec<String> {
    let norm = normalize(text);
    backend
        .tag(&norm)
        .into_iter()
        .filter_map(|(word, tag)| {
            let word = word.trim().to_lowercase();
            if !is_word(&word) || stopwords.contains(&word) {
                return None;
            }
            let lemma = backend.lemmatize(&word, tag);
            if lemma.chars().count() <= 2 || stopwords.contains(&lemma) {
                return None;
            }
            Some(depluralize(&lemma, stopwords))
        })
        .collect()
}

/// What the running process can do. Cheap to clone.
#[derive(Clone, Default)]
pub struct Capabilities {
    linguistic: Option<Arc<dyn LinguisticBackend>>,
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capabilities")
            .field("linguistic", &self.linguistic.as_ref().map(|b| b.name()))
            .finish()
    }
}

impl Capabilities {
    /// Everything compiled into this binary.
    pub fn detect() -> Self {
        #[cfg(feature = "linguistic")]
        {
            Self::with_backend(Arc::new(rules::RuleBackend::new()))
        }
        #[cfg(not(feature = "linguistic"))]
        {
            Self::simple_only()
        }
    }

    pub fn simple_only() -> Self {
        Self { linguistic: None }
    }

    pub fn with_backend(backend: Arc<dyn LinguisticBackend>) -> Self {
        Self {
            linguistic: Some(backend),
        }
    }

    pub fn has_linguistic(&self) -> bool {
        self.linguistic.is_some()
    }

    /// Best available strategy for the caller's preference.
    pub fn tokenizer(&self, prefer_linguistic: bool) -> Tokenizer {
        match (prefer_linguistic, &self.linguistic) {
            (true, Some(backend)) => Tokenizer::Linguistic(Arc::clone(backend)),
            (true, None) => {
                debug!("Linguistic backend unavailable, falling back to simple tokenizer");
                Tokenizer::Simple
            }
            (false, _) => Tokenizer::Simple,
        }
    }
}
