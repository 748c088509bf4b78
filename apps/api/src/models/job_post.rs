use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A captured job post. `title` and `company` may be empty straight out of
/// a parser; the tailoring pipeline requires both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPost {
    pub url: String,
    /// "linkedin" | "other"
    pub source: String,
    pub date_pulled: NaiveDate,
    pub title: String,
    pub company: String,
    pub description: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}
