//! Role Selector — partitions one role's scored bullets into kept and dropped.
//!
//! Order of operations:
//! 1. sort by score, descending (stable)
//! 2. drop bullets scoring below `drop_below_score`
//! 3. promote the best dropped bullets until `min_per_role_keep` is met
//! 4. guardrails, in configured order
//! 5. re-sort kept and truncate to `per_role_keep`
//!
//! The ceiling runs after guardrail promotion, so a promoted bullet can be
//! truncated away again. Such bullets move to `dropped` and the guardrail
//! record carries `retained: false`.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::tailoring::scoring::{sort_by_score_desc, ScoredBullet};
use crate::tailoring::settings::{GuardrailRule, SelectionBounds};
use crate::tailoring::text::{mentions_any, normalize};

/// A guardrail that promoted at least one bullet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuardrailApplied {
    pub name: String,
    /// The first bullet this rule promoted.
    pub promoted_bullet: String,
    /// False when the ceiling truncated the promoted bullet afterwards.
    pub retained: bool,
    #[serde(skip)]
    promoted_index: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    /// Descending by score.
    pub kept: Vec<ScoredBullet>,
    /// Descending by score.
    pub dropped: Vec<ScoredBullet>,
    pub guardrails_applied: Vec<GuardrailApplied>,
}

pub fn select_bullets(
    mut scored: Vec<ScoredBullet>,
    bounds: &SelectionBounds,
    guardrails: &[GuardrailRule],
    job_normalized: &str,
) -> Selection {
    sort_by_score_desc(&mut scored);

    let (mut kept, mut dropped): (Vec<ScoredBullet>, Vec<ScoredBullet>) = scored
        .iter()
        .cloned()
        .partition(|b| b.score >= bounds.drop_below_score);

    if kept.len() < bounds.min_per_role_keep {
        let need = (bounds.min_per_role_keep - kept.len()).min(dropped.len());
        kept.extend(dropped.drain(..need));
    }

    let mut applied = Vec::new();
    for rule in guardrails {
        if let Some(record) = apply_guardrail(rule, &scored, &mut kept, &mut dropped, job_normalized) {
            applied.push(record);
        }
    }

    sort_by_score_desc(&mut kept);
    if kept.len() > bounds.per_role_keep {
        let truncated = kept.split_off(bounds.per_role_keep);
        debug!(count = truncated.len(), "Ceiling truncated kept bullets");
        dropped.extend(truncated);
        sort_by_score_desc(&mut dropped);
    }

    for record in &mut applied {
        record.retained = kept.iter().any(|b| b.index == record.promoted_index);
        if !record.retained {
            warn!(
                guardrail = %record.name,
                "Guardrail-promoted bullet was truncated by per_role_keep"
            );
        }
    }

    Selection {
        kept,
        dropped,
        guardrails_applied: applied,
    }
}

/// Runs one rule. Returns a record only when something was promoted.
fn apply_guardrail(
    rule: &GuardrailRule,
    scored: &[ScoredBullet],
    kept: &mut Vec<ScoredBullet>,
    dropped: &mut Vec<ScoredBullet>,
    job_normalized: &str,
) -> Option<GuardrailApplied> {
    if !rule.is_actionable() || !mentions_any(job_normalized, &rule.triggers) {
        return None;
    }

    let matches = |b: &ScoredBullet| mentions_any(&normalize(&b.bullet), &rule.must_keep_phrases);

    let mut matched = kept.iter().filter(|b| matches(b)).count();
    if matched >= rule.min_keep {
        return None;
    }

    let mut promoted: Option<(usize, String)> = None;

    // Best dropped match first; `dropped` is already score-ordered.
    if let Some(pos) = dropped.iter().position(|b| matches(b)) {
        let bullet = dropped.remove(pos);
        promoted = Some((bullet.index, bullet.bullet.clone()));
        kept.push(bullet);
        matched += 1;
    }

    if matched < rule.min_keep {
        for candidate in scored {
            if matched >= rule.min_keep {
                break;
            }
            if !matches(candidate) || kept.iter().any(|k| k.index == candidate.index) {
                continue;
            }
            dropped.retain(|d| d.index != candidate.index);
            kept.push(candidate.clone());
            promoted.get_or_insert_with(|| (candidate.index, candidate.bullet.clone()));
            matched += 1;
        }
    }

    match promoted {
        Some((promoted_index, promoted_bullet)) => {
            info!(guardrail = %rule.name, bullet = %promoted_bullet, "Guardrail promoted bullet");
            Some(GuardrailApplied {
                name: rule.name.clone(),
                promoted_bullet,
                retained: true,
                promoted_index,
            })
        }
        None => {
            debug!(guardrail = %rule.name, "Guardrail triggered but no bullet matches");
            None
        }
    }
}
