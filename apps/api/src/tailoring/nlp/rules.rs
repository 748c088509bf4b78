//! Rule-based English tagger and lemmatizer.
//!
//! Closed-class lexicon + suffix heuristics for tagging, and a small
//! irregular table + suffix-stripping rules for lemmatization. It is tuned
//! for the vocabulary of résumés and job posts, not general prose.

use std::collections::{HashMap, HashSet};

use super::{LinguisticBackend, PosTag};

const CLOSED_CLASS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "some", "any", "each", "every", "all",
    "both", "either", "neither", "no", "our", "your", "their", "its", "my", "his", "her", "of",
    "in", "on", "at", "by", "for", "with", "from", "into", "onto", "over", "under", "about",
    "across", "through", "between", "among", "within", "without", "during", "via", "per", "to",
    "as", "than", "and", "or", "but", "nor", "so", "yet", "if", "while", "because", "although",
    "whether", "i", "you", "he", "she", "it", "we", "they", "me", "us", "them", "who", "whom",
    "which", "what", "where", "when", "why", "how", "is", "are", "was", "were", "be", "been",
    "being", "am", "do", "does", "did", "have", "has", "had", "will", "would", "shall",
    "should", "can", "could", "may", "might", "must", "not",
];

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "some", "any", "each", "every", "our",
    "your", "their", "its", "my", "his", "her",
];

/// Words after which the next open-class word is read as a verb.
const VERB_CUES: &[&str] = &[
    "to", "will", "would", "shall", "should", "can", "could", "may", "might", "must", "you",
    "we", "they", "i",
];

/// An `-ed` word after one of these continues a verb list ("designed and added").
const CONJUNCTIONS: &[&str] = &["and", "or", "but", "then"];

/// After a preposition an `-ing` word is a gerund object ("of billing").
const PREPOSITIONS: &[&str] = &[
    "of", "in", "on", "at", "by", "for", "with", "from", "into", "onto", "over", "under",
    "about", "across", "through", "between", "among", "within", "without", "during", "via",
    "per",
];

const ADJECTIVES: &[&str] = &[
    "senior", "junior", "strong", "new", "large", "key", "good", "great", "high", "low",
    "excellent", "remote", "hybrid", "best", "top", "fast", "complex", "scalable", "robust",
    "modern", "digital", "global", "strategic", "agile", "early", "daily", "weekly", "monthly",
    "quarterly", "friendly", "deep", "broad", "solid", "proven", "preferred", "required",
    "multiple", "various", "several", "other", "same", "cross-functional", "real-time",
    "full-time", "part-time", "end-to-end",
];

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "ive", "able", "ible", "ical", "ic", "less", "ish", "al",
];

const LY_NOUNS: &[&str] = &["supply", "apply", "family", "assembly", "reply", "anomaly", "ally"];

const IRREGULAR_VERBS: &[(&str, &str)] = &[
    ("led", "lead"), ("built", "build"), ("drove", "drive"), ("driven", "drive"),
    ("ran", "run"), ("made", "make"), ("grew", "grow"), ("grown", "grow"),
    ("wrote", "write"), ("written", "write"), ("oversaw", "oversee"), ("overseen", "oversee"),
    ("taught", "teach"), ("brought", "bring"), ("bought", "buy"), ("sold", "sell"),
    ("won", "win"), ("began", "begin"), ("begun", "begin"), ("spent", "spend"),
    ("sent", "send"), ("kept", "keep"), ("held", "hold"), ("met", "meet"),
    ("took", "take"), ("taken", "take"), ("gave", "give"), ("given", "give"),
    ("saw", "see"), ("seen", "see"), ("went", "go"), ("gone", "go"), ("found", "find"),
    ("thought", "think"), ("chose", "choose"), ("chosen", "choose"), ("became", "become"),
    ("understood", "understand"), ("shipped", "ship"), ("rebuilt", "rebuild"),
];

const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("people", "person"), ("men", "man"), ("women", "woman"), ("children", "child"),
    ("analyses", "analysis"), ("criteria", "criterion"), ("indices", "index"),
    ("data", "data"), ("media", "media"), ("series", "series"), ("news", "news"),
];

const IRREGULAR_ADJECTIVES: &[(&str, &str)] = &[
    ("better", "good"), ("best", "good"), ("worse", "bad"), ("worst", "bad"),
    ("larger", "large"), ("largest", "large"),
];

/// Base verbs ending in a silent `e`; used to restore it after stripping
/// `-ed` / `-ing`.
const E_VERBS: &[&str] = &[
    "manage", "reduce", "drive", "scale", "produce", "introduce", "influence", "enhance",
    "leverage", "improve", "achieve", "increase", "decrease", "release", "resolve", "serve",
    "source", "execute", "compute", "shape", "secure", "define", "configure", "ensure",
    "handle", "engage", "purchase", "advise", "raise", "use", "analyze", "analyse",
    "prioritize", "streamline", "require", "provide", "guide", "code", "save", "move",
    "merge", "close", "share", "stage", "store", "price", "combine", "practice", "balance",
    "change", "challenge", "exercise", "finance", "license", "outsource", "promote",
    "revise", "schedule", "structure", "translate", "write", "arrange", "simplify", "cache",
];

/// Bases whose final doubled consonant is part of the word ("added", "staffed").
const DOUBLE_CONSONANT_BASES: &[&str] = &[
    "add", "staff", "fill", "press", "pass", "buzz", "bill", "call", "sell", "roll", "install",
    "stuff", "buff", "scoff", "sniff", "err", "egg", "ebb", "putt", "spell", "tell", "mill",
];

pub struct RuleBackend {
    closed_class: HashSet<&'static str>,
    determiners: HashSet<&'static str>,
    verb_cues: HashSet<&'static str>,
    conjunctions: HashSet<&'static str>,
    prepositions: HashSet<&'static str>,
    adjectives: HashSet<&'static str>,
    ly_nouns: HashSet<&'static str>,
    irregular_verbs: HashMap<&'static str, &'static str>,
    irregular_nouns: HashMap<&'static str, &'static str>,
    irregular_adjectives: HashMap<&'static str, &'static str>,
    e_verbs: HashSet<&'static str>,
    double_bases: HashSet<&'static str>,
}

impl Default for RuleBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleBackend {
    pub fn new() -> Self {
        Self {
            closed_class: CLOSED_CLASS.iter().copied().collect(),
            determiners: DETERMINERS.iter().copied().collect(),
            verb_cues: VERB_CUES.iter().copied().collect(),
            conjunctions: CONJUNCTIONS.iter().copied().collect(),
            prepositions: PREPOSITIONS.iter().copied().collect(),
            adjectives: ADJECTIVES.iter().copied().collect(),
            ly_nouns: LY_NOUNS.iter().copied().collect(),
            irregular_verbs: IRREGULAR_VERBS.iter().copied().collect(),
            irregular_nouns: IRREGULAR_NOUNS.iter().copied().collect(),
            irregular_adjectives: IRREGULAR_ADJECTIVES.iter().copied().collect(),
            e_verbs: E_VERBS.iter().copied().collect(),
            double_bases: DOUBLE_CONSONANT_BASES.iter().copied().collect(),
        }
    }

    fn tag_word(&self, word: &str, prev: Option<(&str, PosTag)>) -> PosTag {
        let lower = word.to_lowercase();
        let w = lower.as_str();

        if self.closed_class.contains(w) || !w.chars().any(char::is_alphabetic) {
            return PosTag::Other;
        }
        if self.adjectives.contains(w) {
            return PosTag::Adjective;
        }
        if self.irregular_verbs.contains_key(w) {
            return PosTag::Verb;
        }
        if let Some((prev_word, _)) = prev {
            if self.verb_cues.contains(prev_word) {
                return PosTag::Verb;
            }
        }

        let after_determiner = prev.is_some_and(|(p, _)| self.determiners.contains(p));
        let after_preposition = prev.is_some_and(|(p, _)| self.prepositions.contains(p));
        let after_conjunction = prev.is_some_and(|(p, _)| self.conjunctions.contains(p));
        let after_nominal = prev.is_some_and(|(_, t)| matches!(t, PosTag::Noun | PosTag::Adjective));

        if w.len() > 4 && w.ends_with("ly") && !self.ly_nouns.contains(w) {
            return PosTag::Adverb;
        }
        if w.len() > 5 && w.ends_with("ing") {
            return if after_determiner || after_preposition || after_nominal {
                PosTag::Noun
            } else {
                PosTag::Verb
            };
        }
        if let Some(stem) = w.strip_suffix("ed").filter(|_| w.len() > 3) {
            if w.len() == 4 && !self.e_verbs.contains(format!("{stem}e").as_str()) {
                return PosTag::Noun;
            }
            if after_conjunction {
                return PosTag::Verb;
            }
            return match prev {
                None => PosTag::Verb,
                Some((_, PosTag::Noun)) => PosTag::Verb,
                Some(_) => PosTag::Adjective,
            };
        }
        if w.len() > 4 && ADJECTIVE_SUFFIXES.iter().any(|s| w.ends_with(s)) {
            return PosTag::Adjective;
        }
        PosTag::Noun
    }

    fn lemmatize_noun(&self, w: &str) -> String {
        if let Some(base) = self.irregular_nouns.get(w) {
            return (*base).to_string();
        }
        if w.len() > 4 {
            if let Some(stem) = w.strip_suffix("ies") {
                return format!("{stem}y");
            }
        }
        for suffix in ["sses", "xes", "ches", "shes", "zes"] {
            if w.len() > suffix.len() + 1 && w.ends_with(suffix) {
                return w[..w.len() - 2].to_string();
            }
        }
        if w.ends_with("ss") || w.ends_with("us") || w.ends_with("is") {
            return w.to_string();
        }
        if w.len() > 3 {
            if let Some(stem) = w.strip_suffix('s') {
                return stem.to_string();
            }
        }
        w.to_string()
    }

    fn lemmatize_verb(&self, w: &str) -> String {
        if let Some(base) = self.irregular_verbs.get(w) {
            return (*base).to_string();
        }
        if w.len() > 4 {
            if let Some(stem) = w.strip_suffix("ied") {
                return format!("{stem}y");
            }
            if let Some(stem) = w.strip_suffix("ies") {
                return format!("{stem}y");
            }
        }
        if let Some(stem) = w.strip_suffix("ed") {
            // Four-letter forms only when the silent-e base is known ("used").
            if w.len() > 4 || self.e_verbs.contains(format!("{stem}e").as_str()) {
                return self.restore_verb_stem(stem);
            }
        }
        if w.len() > 5 {
            if let Some(stem) = w.strip_suffix("ing") {
                return self.restore_verb_stem(stem);
            }
        }
        for suffix in ["sses", "xes", "ches", "shes", "zes"] {
            if w.len() > suffix.len() + 1 && w.ends_with(suffix) {
                return w[..w.len() - 2].to_string();
            }
        }
        if w.len() > 3 && w.ends_with('s') && !w.ends_with("ss") {
            return w[..w.len() - 1].to_string();
        }
        w.to_string()
    }

    /// Rebuilds a base form after an `-ed`/`-ing` strip: known silent-e verbs
    /// first, then `at/bl/iz/yz` endings, doubled consonants (unless the base
    /// itself ends in one), and short consonant-vowel-consonant stems.
    fn restore_verb_stem(&self, stem: &str) -> String {
        let with_e = format!("{stem}e");
        if self.e_verbs.contains(with_e.as_str()) {
            return with_e;
        }
        if self.double_bases.contains(stem) {
            return stem.to_string();
        }
        if ["at", "bl", "iz", "yz"].iter().any(|s| stem.ends_with(s)) {
            return with_e;
        }
        let chars: Vec<char> = stem.chars().collect();
        if let [.., a, b] = chars.as_slice() {
            if a == b && !is_vowel(*b) && !matches!(*b, 'l' | 's' | 'z') {
                return chars[..chars.len() - 1].iter().collect();
            }
        }
        if measure(&chars) == 1 && ends_cvc(&chars) {
            return with_e;
        }
        stem.to_string()
    }

    fn lemmatize_adjective(&self, w: &str) -> String {
        self.irregular_adjectives
            .get(w)
            .map(|base| (*base).to_string())
            .unwrap_or_else(|| w.to_string())
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Number of vowel-consonant sequences, Porter style.
fn measure(chars: &[char]) -> usize {
    let mut m = 0;
    let mut seen_vowel = false;
    for &c in chars {
        if is_vowel(c) {
            seen_vowel = true;
        } else if seen_vowel {
            m += 1;
            seen_vowel = false;
        }
    }
    m
}

fn ends_cvc(chars: &[char]) -> bool {
    match chars {
        [.., a, b, c] => {
            !is_vowel(*a) && is_vowel(*b) && !is_vowel(*c) && !matches!(*c, 'w' | 'x' | 'y')
        }
        _ => false,
    }
}

/// Word tokens keep `-`, `+`, `/`, `#` and `'`; any other non-space char is
/// its own token.
fn split_tokens(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    for c in text.chars() {
        if c.is_alphanumeric() || matches!(c, '-' | '+' | '/' | '#' | '\'') {
            current.push(c);
            continue;
        }
        if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
        if !c.is_whitespace() {
            tokens.push(c.to_string());
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

impl LinguisticBackend for RuleBackend {
    fn tag(&self, text: &str) -> Vec<(String, PosTag)> {
        let mut tagged: Vec<(String, PosTag)> = Vec::new();
        for token in split_tokens(text) {
            let prev = tagged.last().map(|(w, t)| (w.as_str(), *t));
            // Sentence punctuation resets context.
            let prev = prev.filter(|(w, _)| w.chars().any(char::is_alphanumeric));
            let tag = self.tag_word(&token, prev);
            tagged.push((token, tag));
        }
        tagged
    }

    fn lemmatize(&self, word: &str, tag: PosTag) -> String {
        match tag {
            PosTag::Noun => self.lemmatize_noun(word),
            PosTag::Verb => self.lemmatize_verb(word),
            PosTag::Adjective => self.lemmatize_adjective(word),
            PosTag::Adverb | PosTag::Other => word.to_string(),
        }
    }

    fn name(&self) -> &'static str {
        "rules"
    }
}
