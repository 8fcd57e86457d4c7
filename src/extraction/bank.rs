//! Pattern Bank
//!
//! Ordered, per-family catalogues of extraction rules for each judgement
//! protocol. Rather than one universal pattern, each model family owns its
//! own rule list; rules are tried in declared order and the first rule
//! producing a match for a given aspect wins that aspect.
//!
//! The tables are data: adding a judge family is a new entry here, not a
//! new branch in the resolver.

use std::collections::HashMap;

use regex::{Captures, Regex};

use crate::extraction::family::ModelFamily;
use crate::extraction::types::{Aspect, JudgementKind};

/// Aspect-label alternation shared by every summary rule. Both spellings
/// of the fluency label occur in the wild; synonym normalization collapses
/// them afterwards.
const ASPECT: &str =
    "Content Adequacy|Conciseness|Fluency & Understandability|Fluency and Understandability";

/// How a rule's match is assigned to an aspect
#[derive(Debug, Clone, Copy)]
pub enum AspectPolicy {
    /// Aspect named by the rule's `aspect` capture, synonym-normalized
    Labelled,
    /// Every match of the rule resolves this fixed aspect
    Fixed(Aspect),
}

impl AspectPolicy {
    /// Canonical aspect this match resolves, if any.
    pub fn aspect_of(&self, caps: &Captures) -> Option<Aspect> {
        match self {
            AspectPolicy::Fixed(aspect) => Some(*aspect),
            AspectPolicy::Labelled => caps
                .name("aspect")
                .and_then(|label| Aspect::from_label(label.as_str())),
        }
    }
}

/// One compiled extraction rule. Rating and rationale come from the
/// optional named captures `rating` and `rationale`; a rule lacking one of
/// them leaves that half sentinel.
#[derive(Debug)]
pub struct PatternRule {
    pub matcher: Regex,
    pub policy: AspectPolicy,
}

impl PatternRule {
    /// Case-sensitive rule resolving the single correctness aspect.
    fn correctness(pattern: &str) -> Self {
        Self {
            matcher: Regex::new(pattern).unwrap(),
            policy: AspectPolicy::Fixed(Aspect::Correctness),
        }
    }

    /// Case-insensitive rule whose aspect comes from its `aspect` capture.
    fn labelled(pattern: &str) -> Self {
        Self {
            matcher: Regex::new(&format!("(?i){pattern}")).unwrap(),
            policy: AspectPolicy::Labelled,
        }
    }
}

/// Verdict-phrase fallback for boolean judgements.
///
/// Consulted only after every primary rule failed. The verdict phrase must
/// occur exactly once in the text and the rationale pattern must match on
/// its own, otherwise the aspect stays sentinel.
#[derive(Debug)]
pub struct VerdictFallback {
    pub verdict: Regex,
    pub rationale: Regex,
}

/// Immutable `(family, kind)` → ordered rule list lookup, built once at
/// construction.
#[derive(Debug)]
pub struct PatternBank {
    rules: HashMap<(ModelFamily, JudgementKind), Vec<PatternRule>>,
    fallbacks: HashMap<ModelFamily, VerdictFallback>,
}

impl PatternBank {
    pub fn new() -> Self {
        let mut rules = HashMap::new();
        for family in ModelFamily::ALL {
            rules.insert((family, JudgementKind::Boolean), build_boolean_rules());
            rules.insert((family, JudgementKind::FiveLevel), build_five_level_rules());
            rules.insert((family, JudgementKind::Summary), build_summary_rules(family));
        }

        let mut fallbacks = HashMap::new();
        fallbacks.insert(
            ModelFamily::DeepseekCoder1_3b,
            VerdictFallback {
                verdict: Regex::new(r"\*\*(?P<verdict>Wrong|Correct) Implementation\*\*").unwrap(),
                rationale: Regex::new(RATIONALE_ONLY).unwrap(),
            },
        );
        fallbacks.insert(
            ModelFamily::CodeLlama13b,
            VerdictFallback {
                verdict: Regex::new(r"(?P<verdict>Wrong|Correct) Implementation").unwrap(),
                rationale: Regex::new(RATIONALE_ONLY).unwrap(),
            },
        );

        Self { rules, fallbacks }
    }

    /// Ordered rule list for one family/protocol pair. Families with no
    /// rules for a protocol get an empty slice; every aspect of such a
    /// judgement resolves to the sentinel.
    pub fn lookup(&self, family: ModelFamily, kind: JudgementKind) -> &[PatternRule] {
        self.rules
            .get(&(family, kind))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Family-specific boolean fallback, if one exists.
    pub fn fallback(&self, family: ModelFamily, kind: JudgementKind) -> Option<&VerdictFallback> {
        if kind != JudgementKind::Boolean {
            return None;
        }
        self.fallbacks.get(&family)
    }
}

impl Default for PatternBank {
    fn default() -> Self {
        Self::new()
    }
}

const RATIONALE_ONLY: &str = r"# Rationale\s*(?P<rationale>.+)";

fn build_boolean_rules() -> Vec<PatternRule> {
    vec![PatternRule::correctness(
        r"# Rating\s*(?P<rating>\d+)\s*# Rationale\s*(?P<rationale>.+)",
    )]
}

fn build_five_level_rules() -> Vec<PatternRule> {
    // the last pair recognizes ratings embedded in the full descriptive
    // scale labels; the resolver keeps only the leading ordinal
    let scale_label = "1\\.\\*\\*Very unlikely to be correct\\*\\*\
                       |2\\.\\*\\*Unlikely to be correct\\*\\*\
                       |3\\.\\*\\*Undecided\\*\\*\
                       |4\\.\\*\\*Likely to be correct\\*\\*\
                       |5\\.\\*\\*Very likely to be correct\\*\\*";
    vec![
        PatternRule::correctness(r"# Rating\s*(?P<rating>\d+)\s*# Rationale\s*(?P<rationale>.+)"),
        PatternRule::correctness(r"# Rationale\s*(?P<rationale>.+)\s*# Rating\s*(?P<rating>\d+)"),
        PatternRule::correctness(
            r"(?:#\s*)?Rating:\s*(?P<rating>\d+)\s*(?:#\s*)?Rationale:\s*(?P<rationale>.+)",
        ),
        PatternRule::correctness(
            r"(?:#\s*)?Rationale:\s*(?P<rationale>.+)\s*(?:#\s*)?Rating:\s*(?P<rating>\d+)",
        ),
        PatternRule::correctness(&format!(
            r"# Rating\s*(?P<rating>{scale_label})\s*# Rationale\s*(?P<rationale>.+)"
        )),
        PatternRule::correctness(&format!(
            r"# Rationale\s*(?P<rationale>.+)\s*# Rating\s*(?P<rating>{scale_label})"
        )),
    ]
}

fn build_summary_rules(family: ModelFamily) -> Vec<PatternRule> {
    let patterns: Vec<String> = match family {
        ModelFamily::CodeLlama7b => vec![
            format!(r"\s*(?P<aspect>{ASPECT}):?\s*(?P<rating>[1-5])"),
            format!(r"\s*(?P<aspect>{ASPECT}):?\n\n\* Rating:\s*(?P<rating>[1-5])"),
            format!(r"[1-3]\.\s*(?P<aspect>{ASPECT}):?\n\nRating:\s*(?P<rating>[1-5])"),
            format!(r"[1-3]\.\s*(?P<aspect>{ASPECT}):?\s*(?P<rating>[1-5])"),
            format!(r"the (?P<aspect>{ASPECT}) as (?P<rating>[1-5])"),
            format!(r"The Comment is rated (?P<rating>[1-5]) out of 5 for (?P<aspect>{ASPECT})"),
        ],
        ModelFamily::CodeLlama13b => vec![
            format!(r"#{{2}}\s*(?P<aspect>{ASPECT}):?\n\n\*? ?Rating:\s*(?P<rating>[1-5])"),
            format!(r"\s*(?P<aspect>{ASPECT}):?\s*(?P<rating>[1-5])"),
            format!(r"[1-3]\.\s*(?P<aspect>{ASPECT}):?\nRating:?\s*(?P<rating>[1-5])"),
            format!(r"the (?P<aspect>{ASPECT}) as (?P<rating>[1-5])"),
        ],
        ModelFamily::CodeLlama34b => vec![
            format!(r"#{{2}}\s*(?P<aspect>{ASPECT}):?\n\n\*? ?Rating:\s*(?P<rating>[1-5])"),
            format!(r"\s*(?P<aspect>{ASPECT}):?\s*(?P<rating>[1-5])"),
        ],
        ModelFamily::Gpt35Turbo => vec![
            format!(r"\#\s*(?P<aspect>{ASPECT}):?\n#{{2}}\s*\#?\s*Rating:\s*(?P<rating>[1-5])"),
            format!(r"\#\s*(?P<aspect>{ASPECT}):?\n(?P<rating>[1-5])"),
            format!(r"#{{2}}\s*(?P<aspect>{ASPECT}):?\n#{{3}}\s*\#?\s*Rating:\s*(?P<rating>[1-5])"),
        ],
        ModelFamily::Gpt4Turbo => vec![
            format!(r"\s*(?P<aspect>{ASPECT}):?\n\*\*\s*\#?\s*Rating:\s*(?P<rating>[1-5])"),
            format!(
                r"#{{3}}\s*[1-3]\.\s*(?P<aspect>{ASPECT}):?\n\*\*\s*\#?\s*Rating:\s*(?P<rating>[1-5])"
            ),
            format!(r"#{{3}}\s*[1-3]\.\s*(?P<aspect>{ASPECT}):?\n#{{4}}\s*Rating:\s*(?P<rating>[1-5])"),
            format!(r"#{{3}}\s*(?P<aspect>{ASPECT}):?\n#{{4}}\s*Rating:?\n(?P<rating>[1-5])"),
            format!(r"#{{2}}\s*(?P<aspect>{ASPECT}):?\n#{{3}}\s*Rating:?\n(?P<rating>[1-5])"),
            format!(r"#{{2}}\s*(?P<aspect>{ASPECT}):?\n#{{3}}\s*Rating:?\s*(?P<rating>[1-5])"),
            format!(r"#{{3}}\s*(?P<aspect>{ASPECT}):?\n#{{4}}\s*Rating:?\s*(?P<rating>[1-5])"),
            format!(r"\#\s*(?P<aspect>{ASPECT}):?\n\*\*\s*Rating:?\*\*:?\s*(?P<rating>[1-5])"),
            format!(r"\*\*(?P<aspect>{ASPECT}) Rating:?\s*(?P<rating>[1-5])"),
            format!(r"\*\*(?P<aspect>{ASPECT}):?\*\*\nRating:?\s*(?P<rating>[1-5])"),
        ],
        // the deepseek judges were never run on summarization; no rules
        ModelFamily::DeepseekCoder1_3b
        | ModelFamily::DeepseekCoder6_7b
        | ModelFamily::DeepseekCoder33b => Vec::new(),
    };

    patterns
        .iter()
        .map(|pattern| PatternRule::labelled(pattern))
        .collect()
}
