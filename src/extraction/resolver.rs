//! Resolver
//!
//! Normalizes raw judge output, runs the family's ordered rules against it
//! and assembles one structured judgement per raw record. Pure text-to-
//! structure transformation: no I/O, no retained state, never fails.
//! Anything unparseable resolves to the sentinel.

use regex::Captures;
use tracing::debug;

use crate::extraction::bank::{PatternBank, VerdictFallback};
use crate::extraction::normalize::normalize;
use crate::extraction::types::{
    Aspect, ExtractedRating, JudgementKind, RawJudgement, StructuredJudgement, SENTINEL,
};

lazy_static::lazy_static! {
    /// Process-wide resolver over the default pattern bank.
    pub static ref DEFAULT_RESOLVER: Resolver = Resolver::default();
}

/// Stateless judgement resolver. Safe to invoke concurrently across
/// independent records; the bank is immutable after construction.
#[derive(Debug)]
pub struct Resolver {
    bank: PatternBank,
}

impl Resolver {
    pub fn new(bank: PatternBank) -> Self {
        Self { bank }
    }

    /// Recover a structured judgement from one raw judge response.
    ///
    /// Every aspect of the requested kind yields exactly one rating entry,
    /// in canonical aspect order; aspects no rule resolved carry the
    /// sentinel on both halves.
    pub fn resolve(&self, raw: &RawJudgement) -> StructuredJudgement {
        let text = normalize(&raw.raw_text, raw.kind);
        let aspects = raw.kind.aspects();
        let mut resolved: Vec<Option<ExtractedRating>> = vec![None; aspects.len()];

        match raw.kind {
            JudgementKind::Summary => self.resolve_labelled(raw, &text, aspects, &mut resolved),
            JudgementKind::Boolean | JudgementKind::FiveLevel => {
                self.resolve_single(raw, &text, &mut resolved)
            }
        }

        let ratings = aspects
            .iter()
            .zip(resolved)
            .map(|(aspect, slot)| slot.unwrap_or_else(|| ExtractedRating::unresolved(*aspect)))
            .collect();

        StructuredJudgement {
            record_id: raw.record_id.clone(),
            judged_entity: raw.judged_entity.clone(),
            ratings,
        }
    }

    /// Multi-aspect resolution: every match of a rule is assigned to the
    /// aspect its label names, first rule to reach an aspect wins it, and
    /// the rule loop short-circuits once all aspects are resolved.
    fn resolve_labelled(
        &self,
        raw: &RawJudgement,
        text: &str,
        aspects: &[Aspect],
        resolved: &mut [Option<ExtractedRating>],
    ) {
        let mut remaining = aspects.len();
        for rule in self.bank.lookup(raw.family, raw.kind) {
            for caps in rule.matcher.captures_iter(text) {
                let Some(aspect) = rule.policy.aspect_of(&caps) else {
                    continue;
                };
                let Some(slot) = aspects.iter().position(|a| *a == aspect) else {
                    continue;
                };
                if resolved[slot].is_some() {
                    continue;
                }
                resolved[slot] = Some(rating_from(aspect, &caps, raw.kind));
                remaining -= 1;
            }
            if remaining == 0 {
                break;
            }
        }
    }

    /// Single-aspect resolution: first rule whose first match succeeds
    /// wins; boolean judgements fall back to the family's verdict-phrase
    /// rule when every primary rule failed.
    fn resolve_single(
        &self,
        raw: &RawJudgement,
        text: &str,
        resolved: &mut [Option<ExtractedRating>],
    ) {
        for rule in self.bank.lookup(raw.family, raw.kind) {
            if let Some(caps) = rule.matcher.captures(text) {
                resolved[0] = Some(rating_from(Aspect::Correctness, &caps, raw.kind));
                return;
            }
        }

        if let Some(fallback) = self.bank.fallback(raw.family, raw.kind) {
            resolved[0] = apply_fallback(fallback, text);
        }

        if resolved[0].is_none() {
            debug!(
                record_id = %raw.record_id,
                family = %raw.family,
                "no rule matched; rating left unresolved"
            );
        }
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(PatternBank::new())
    }
}

/// Build the rating entry for one matched rule.
fn rating_from(aspect: Aspect, caps: &Captures, kind: JudgementKind) -> ExtractedRating {
    let rating = match caps.name("rating") {
        Some(m) => {
            let token = m.as_str().trim();
            // five-level ratings may arrive embedded in a descriptive
            // label ("4.**Likely to be correct**"); keep the ordinal only
            if kind == JudgementKind::FiveLevel && token.chars().count() > 1 {
                token.chars().take(1).collect()
            } else {
                token.to_string()
            }
        }
        None => SENTINEL.to_string(),
    };
    let rationale = match caps.name("rationale") {
        Some(m) => m.as_str().trim().to_string(),
        None => SENTINEL.to_string(),
    };
    ExtractedRating {
        aspect,
        rating,
        rationale,
    }
}

/// Verdict-phrase fallback: requires exactly one phrase occurrence and an
/// independently matching rationale, otherwise the aspect stays sentinel.
fn apply_fallback(fallback: &VerdictFallback, text: &str) -> Option<ExtractedRating> {
    let mut verdicts = fallback.verdict.captures_iter(text);
    let first = verdicts.next()?;
    if verdicts.next().is_some() {
        // ambiguous text, both or repeated verdict phrases
        return None;
    }
    let rationale = fallback.rationale.captures(text)?;
    let rating = if &first["verdict"] == "Correct" { "1" } else { "0" };
    Some(ExtractedRating {
        aspect: Aspect::Correctness,
        rating: rating.to_string(),
        rationale: rationale["rationale"].trim().to_string(),
    })
}
