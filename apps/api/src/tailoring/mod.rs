// Tailoring engine: relevance scoring and per-role bullet selection, plus the
// request pipeline and HTTP handlers around it.

pub mod competencies;
pub mod engine;
pub mod gaps;
pub mod handlers;
pub mod job_terms;
pub mod nlp;
pub mod pipeline;
pub mod scoring;
pub mod selector;
pub mod settings;
pub mod text;
