//! Markdown résumé plumbing around the tailoring engine: section parsing and
//! re-rendering, the core-competencies block, contact and frontmatter
//! injection, and output spacing / notes rules.

pub mod competencies;
pub mod frontmatter;
pub mod markdown;
pub mod notes;
pub mod parse;
