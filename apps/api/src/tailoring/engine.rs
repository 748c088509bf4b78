//! Tailoring engine — the single entry point from a parsed résumé and a job
//! post to new roles plus a structured report.
//!
//! Total over its inputs: degenerate cases (no roles, no bullets, empty job
//! text, guardrails that never match) produce empty or unchanged output.

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::document::competencies::extract_core_competencies;
use crate::models::resume::{ResumeDoc, Role};
use crate::tailoring::competencies::reorder_competencies;
use crate::tailoring::gaps::{missing_keywords, MissingKeyword};
use crate::tailoring::nlp::{Capabilities, Tokenizer, TokenizerMode};
use crate::tailoring::scoring::{score_bullet, JobContext, ScoredBullet};
use crate::tailoring::selector::{select_bullets, GuardrailApplied};
use crate::tailoring::settings::{GuardrailRule, SelectionBounds, TailorConfig};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleReport {
    pub role_header: String,
    pub company_header: Option<String>,
    pub guardrails_applied: Vec<GuardrailApplied>,
    pub kept: Vec<ScoredBullet>,
    pub dropped: Vec<ScoredBullet>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TailorReport {
    /// Tokenizer mode that actually ran.
    pub tokenizer_mode: TokenizerMode,
    pub job_terms_auto: Vec<String>,
    pub missing_keywords: Vec<MissingKeyword>,
    pub guardrails: Vec<GuardrailRule>,
    pub roles: Vec<RoleReport>,
    pub config: SelectionBounds,
    /// Empty when the document has no competencies block.
    pub core_competencies_reordered: Vec<String>,
}

/// Scores and selects the bullets of every role and reorders the
/// core-competencies block when the document has one.
///
/// The tokenizer is the best one `caps` offers for `config.use_linguistic`.
/// Roles are processed in parallel and returned in document order.
pub fn tailor(
    doc: &ResumeDoc,
    job_text: &str,
    config: &TailorConfig,
    caps: &Capabilities,
) -> (Vec<Role>, TailorReport) {
    let tokenizer = caps.tokenizer(config.use_linguistic);
    let job = JobContext::new(job_text, config, &tokenizer);
    debug!(
        mode = ?tokenizer.mode(),
        auto_terms = job.auto_terms.len(),
        "Extracted job terms"
    );

    let (new_roles, role_reports): (Vec<Role>, Vec<RoleReport>) = doc
        .roles
        .par_iter()
        .map(|role| tailor_role(role, &job, config, &tokenizer))
        .unzip();

    let competencies = extract_core_competencies(&doc.lines);
    let core_competencies_reordered =
        reorder_competencies(&competencies.items, &job, config, &tokenizer);
    let missing = missing_keywords(&doc.text(), job_text, config, &job.auto_terms);

    let kept_total: usize = role_reports.iter().map(|r| r.kept.len()).sum();
    let dropped_total: usize = role_reports.iter().map(|r| r.dropped.len()).sum();
    info!(
        roles = new_roles.len(),
        kept = kept_total,
        dropped = dropped_total,
        missing_keywords = missing.len(),
        "Tailoring complete"
    );

    let report = TailorReport {
        tokenizer_mode: tokenizer.mode(),
        job_terms_auto: job.auto_terms,
        missing_keywords: missing,
        guardrails: config.guardrails.clone(),
        roles: role_reports,
        config: config.selection.clone(),
        core_competencies_reordered,
    };
    (new_roles, report)
}

fn tailor_role(
    role: &Role,
    job: &JobContext,
    config: &TailorConfig,
    tokenizer: &Tokenizer,
) -> (Role, RoleReport) {
    let scored = role
        .bullet_lines
        .iter()
        .enumerate()
        .map(|(index, bullet)| {
            let (score, details) = score_bullet(bullet, job, config, tokenizer);
            ScoredBullet {
                index,
                score,
                bullet: bullet.clone(),
                details,
            }
        })
        .collect();

    let selection = select_bullets(scored, &config.selection, &config.guardrails, &job.normalized);
    debug!(
        role = %role.role_header,
        kept = selection.kept.len(),
        dropped = selection.dropped.len(),
        "Selected bullets"
    );

    let new_role = role.with_bullets(selection.kept.iter().map(|b| b.bullet.clone()).collect());
    let report = RoleReport {
        role_header: role.role_header.clone(),
        company_header: role.company_header.clone(),
        guardrails_applied: selection.guardrails_applied,
        kept: selection.kept,
        dropped: selection.dropped,
    };
    (new_role, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::tailoring::nlp::tests::StubBackend;

    fn role(header: &str, bullets: &[&str]) -> Role {
        Role {
            role_header: header.to_string(),
            company_header: Some("#### Acme".to_string()),
            bullet_lines: bullets.iter().map(|s| s.to_string()).collect(),
            other_lines: vec!["Remote".to_string()],
        }
    }

    fn doc(roles: Vec<Role>) -> ResumeDoc {
        let mut lines = vec!["## PROFESSIONAL_EXPERIENCE".to_string()];
        for r in &roles {
            lines.push(r.role_header.clone());
            lines.extend(r.bullet_lines.iter().cloned());
        }
        ResumeDoc {
            lines,
            prof_exp_start: Some(0),
            prof_exp_end: None,
            roles,
        }
    }

    fn scenario_config() -> TailorConfig {
        let mut config = TailorConfig::default();
        config.selection.min_per_role_keep = 2;
        config.selection.drop_below_score = 0.0;
        config.stopwords = ["with", "of", "and", "the"].iter().map(|s| s.to_string()).collect();
        config
    }

    const SCENARIO: [&str; 3] = [
        "- Led migration of billing system",
        "- Helped with onboarding",
        "- Built $2M pipeline automation",
    ];

    #[test]
    fn test_migration_scenario() {
        let doc = doc(vec![role("### Staff Engineer", &SCENARIO)]);
        let job = "Drive the platform migration and deliver $2M in savings.";
        let (roles, report) = tailor(&doc, job, &scenario_config(), &Capabilities::simple_only());

        assert_eq!(
            roles[0].bullet_lines,
            vec!["- Built $2M pipeline automation", "- Led migration of billing system"]
        );
        let dropped = &report.roles[0].dropped;
        assert_eq!(dropped.len(), 1);
        assert_eq!(dropped[0].bullet, "- Helped with onboarding");
        assert_eq!(dropped[0].details.generic_penalty, 1);
        assert!(dropped[0].score < 0.0);
    }

    #[test]
    fn test_floor_retains_generic_bullet_when_needed() {
        let mut config = scenario_config();
        config.selection.min_per_role_keep = 3;
        let doc = doc(vec![role("### Staff Engineer", &SCENARIO)]);
        let (roles, _) = tailor(&doc, "migration", &config, &Capabilities::simple_only());
        assert_eq!(roles[0].bullet_lines.len(), 3);
        assert_eq!(roles[0].bullet_lines[2], "- Helped with onboarding");
    }

    #[test]
    fn test_new_roles_preserve_headers_and_other_lines() {
        let original = role("### Staff Engineer", &SCENARIO);
        let (roles, _) = tailor(&doc(vec![original.clone()]), "", &scenario_config(), &Capabilities::simple_only());
        assert_eq!(roles[0].role_header, original.role_header);
        assert_eq!(roles[0].company_header, original.company_header);
        assert_eq!(roles[0].other_lines, original.other_lines);
    }

    #[test]
    fn test_empty_job_text_does_not_crash() {
        let doc = doc(vec![role("### Staff Engineer", &SCENARIO)]);
        let (_, report) = tailor(&doc, "", &scenario_config(), &Capabilities::simple_only());
        assert!(report.job_terms_auto.is_empty());
        for b in report.roles[0].kept.iter().chain(&report.roles[0].dropped) {
            assert_eq!(b.details.overlap, 0);
            assert_eq!(b.details.auto_hits, 0);
        }
    }

    #[test]
    fn test_roles_keep_document_order() {
        let roles: Vec<Role> = (0..8)
            .map(|i| role(&format!("### Role {i}"), &["- Built things", "- Led migration"]))
            .collect();
        let (new_roles, report) = tailor(&doc(roles), "migration", &scenario_config(), &Capabilities::simple_only());
        let headers: Vec<_> = new_roles.iter().map(|r| r.role_header.clone()).collect();
        let expected: Vec<_> = (0..8).map(|i| format!("### Role {i}")).collect();
        assert_eq!(headers, expected);
        assert_eq!(report.roles.len(), 8);
    }

    #[test]
    fn test_runs_are_deterministic() {
        let doc = doc(vec![
            role("### A", &SCENARIO),
            role("### B", &["- Scaled kafka", "- Scaled kafka", "- Wrote docs"]),
        ]);
        let job = "migration kafka $2M onboarding";
        let config = scenario_config();
        let caps = Capabilities::simple_only();
        let first = serde_json::to_string(&tailor(&doc, job, &config, &caps).1).unwrap();
        let second = serde_json::to_string(&tailor(&doc, job, &config, &caps).1).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_report_records_actual_tokenizer_mode() {
        let doc = doc(vec![role("### A", &SCENARIO)]);
        let config = scenario_config().with_linguistic(true);

        let (_, simple) = tailor(&doc, "migration", &config, &Capabilities::simple_only());
        assert_eq!(simple.tokenizer_mode, TokenizerMode::Simple);

        let caps = Capabilities::with_backend(Arc::new(StubBackend));
        let (_, linguistic) = tailor(&doc, "migration", &config, &caps);
        assert_eq!(linguistic.tokenizer_mode, TokenizerMode::Linguistic);
    }

    #[test]
    fn test_competencies_and_gaps_in_report() {
        let mut config = scenario_config();
        config.terms.required = vec!["terraform".to_string()];
        let mut doc = doc(vec![role("### A", &SCENARIO)]);
        doc.lines.extend(
            ["## CORE_COMPETENCIES", "- Python", "- SQL", "- Kubernetes"]
                .iter()
                .map(|s| s.to_string()),
        );
        let (_, report) = tailor(
            &doc,
            "kubernetes kubernetes terraform",
            &config,
            &Capabilities::simple_only(),
        );
        assert_eq!(
            report.core_competencies_reordered,
            vec!["- Kubernetes", "- Python", "- SQL"]
        );
        assert!(report.missing_keywords.iter().any(|m| m.keyword == "terraform"));
    }

    #[test]
    fn test_document_without_roles() {
        let (roles, report) = tailor(&ResumeDoc::default(), "anything", &scenario_config(), &Capabilities::simple_only());
        assert!(roles.is_empty());
        assert!(report.roles.is_empty());
        assert!(report.core_competencies_reordered.is_empty());
    }
}
