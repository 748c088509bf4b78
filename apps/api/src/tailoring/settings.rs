//! Tailoring configuration: selection bounds, scoring weights, term lists,
//! word sets and guardrail rules.
//!
//! A `TailorConfig` is an immutable value for the duration of a run. Per-run
//! adjustments (company stopwords, tokenizer preference) go through
//! `with_extra_stopwords` / `with_linguistic`, which return a new value.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_ACTION_VERBS: &[&str] = &[
    "led", "lead", "owned", "own", "built", "build", "created", "create", "implemented",
    "implement", "launched", "launch", "designed", "design", "delivered", "deliver", "migrated",
    "migrate", "optimized", "optimize", "scaled", "scale", "spearheaded", "drove", "drive",
    "managed", "manage", "guided", "guide", "partnered", "partner", "facilitated", "facilitate",
    "oversaw", "oversee", "standardized", "standardize", "developed", "develop", "improved",
    "improve", "aligned", "align",
];

const DEFAULT_GENERIC_PENALTIES: &[&str] = &[
    "responsible for",
    "worked on",
    "helped",
    "assisted",
    "involved in",
    "participated in",
    "contributed to",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse stopwords YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Stopwords file must map group names to word lists")]
    StopwordsShape,
}

/// How many bullets a role keeps, and the score below which a bullet is dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionBounds {
    pub per_role_keep: usize,
    pub min_per_role_keep: usize,
    pub drop_below_score: f64,
}

impl Default for SelectionBounds {
    fn default() -> Self {
        Self {
            per_role_keep: 6,
            min_per_role_keep: 3,
            drop_below_score: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub w_required: f64,
    pub w_nice: f64,
    pub w_domain: f64,
    pub w_overlap: f64,
    /// Accepted for config compatibility; no signal reads it.
    pub w_phrase_hit: f64,
    pub w_metric: f64,
    pub w_action_verb: f64,
    pub w_generic_penalty: f64,
    pub w_length_penalty: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            w_required: 3.0,
            w_nice: 1.0,
            w_domain: 2.0,
            w_overlap: 0.12,
            w_phrase_hit: 1.25,
            w_metric: 1.5,
            w_action_verb: 0.75,
            w_generic_penalty: 1.0,
            w_length_penalty: 0.4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TermLists {
    pub required: Vec<String>,
    pub nice_to_have: Vec<String>,
    pub domain: Vec<String>,
    pub max_auto_terms: usize,
}

impl Default for TermLists {
    fn default() -> Self {
        Self {
            required: Vec::new(),
            nice_to_have: Vec::new(),
            domain: Vec::new(),
            max_auto_terms: 25,
        }
    }
}

/// Keep bullets about a theme when the job post signals that theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuardrailRule {
    #[serde(default = "default_guardrail_name")]
    pub name: String,
    #[serde(default)]
    pub triggers: Vec<String>,
    #[serde(default)]
    pub must_keep_phrases: Vec<String>,
    #[serde(default = "default_min_keep")]
    pub min_keep: usize,
}

fn default_guardrail_name() -> String {
    "unnamed".to_string()
}

fn default_min_keep() -> usize {
    1
}

impl GuardrailRule {
    /// Rules without triggers, without phrases or with `min_keep == 0` never fire.
    pub fn is_actionable(&self) -> bool {
        !self.triggers.is_empty() && !self.must_keep_phrases.is_empty() && self.min_keep > 0
    }
}

fn default_guardrails() -> Vec<GuardrailRule> {
    let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    vec![GuardrailRule {
        name: "migration".to_string(),
        triggers: owned(&[
            "migration",
            "migrate",
            "data migration",
            "platform migration",
            "system migration",
            "transition",
            "cutover",
        ]),
        must_keep_phrases: owned(&[
            "migration",
            "migrate",
            "data migration",
            "platform",
            "transition",
            "cutover",
        ]),
        min_keep: 1,
    }]
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    pub email: String,
    pub location: String,
    pub phone: String,
}

impl ContactInfo {
    pub fn is_complete(&self) -> bool {
        !self.email.trim().is_empty()
            && !self.location.trim().is_empty()
            && !self.phone.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TailorConfig {
    /// Prefer the linguistic tokenizer when the backend is available.
    #[serde(alias = "use_nltk")]
    pub use_linguistic: bool,
    #[serde(rename = "tailor")]
    pub selection: SelectionBounds,
    #[serde(rename = "scoring")]
    pub weights: ScoringWeights,
    pub terms: TermLists,
    pub stopwords: BTreeSet<String>,
    pub action_verbs: BTreeSet<String>,
    pub generic_penalties: BTreeSet<String>,
    pub guardrails: Vec<GuardrailRule>,
    pub contact: ContactInfo,
}

impl Default for TailorConfig {
    fn default() -> Self {
        Self {
            use_linguistic: false,
            selection: SelectionBounds::default(),
            weights: ScoringWeights::default(),
            terms: TermLists::default(),
            stopwords: BTreeSet::new(),
            action_verbs: DEFAULT_ACTION_VERBS.iter().map(|s| s.to_string()).collect(),
            generic_penalties: DEFAULT_GENERIC_PENALTIES.iter().map(|s| s.to_string()).collect(),
            guardrails: default_guardrails(),
            contact: ContactInfo::default(),
        }
    }
}

impl TailorConfig {
    /// Loads the configuration from a TOML file. Keys that are absent keep
    /// their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = read_existing(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        if config.selection.min_per_role_keep > config.selection.per_role_keep {
            tracing::warn!(
                min = config.selection.min_per_role_keep,
                max = config.selection.per_role_keep,
                "min_per_role_keep exceeds per_role_keep; the ceiling wins"
            );
        }
        Ok(config)
    }

    /// New config whose stopword set also contains `extra`.
    pub fn with_extra_stopwords<I>(&self, extra: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut next = self.clone();
        next.stopwords.extend(extra);
        next
    }

    /// New config with the stopword set replaced.
    pub fn with_stopwords(&self, stopwords: BTreeSet<String>) -> Self {
        Self {
            stopwords,
            ..self.clone()
        }
    }

    pub fn with_linguistic(&self, use_linguistic: bool) -> Self {
        Self {
            use_linguistic,
            ..self.clone()
        }
    }
}

/// Loads stopwords from a YAML mapping of group name to word list. Every
/// string item is trimmed and lowercased; groups are unioned.
pub fn load_stopwords(path: &Path) -> Result<BTreeSet<String>, ConfigError> {
    let content = read_existing(path)?;
    parse_stopwords(&content)
}

pub fn parse_stopwords(content: &str) -> Result<BTreeSet<String>, ConfigError> {
    let value: serde_yaml::Value = serde_yaml::from_str(content)?;
    let groups = match value {
        serde_yaml::Value::Null => return Ok(BTreeSet::new()),
        serde_yaml::Value::Mapping(groups) => groups,
        _ => return Err(ConfigError::StopwordsShape),
    };

    let words = groups
        .into_iter()
        .filter_map(|(_, group)| match group {
            serde_yaml::Value::Sequence(items) => Some(items),
            _ => None,
        })
        .flatten()
        .filter_map(|item| item.as_str().map(|w| w.trim().to_lowercase()))
        .collect();
    Ok(words)
}

fn read_existing(path: &Path) -> Result<String, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}
