use serde::{Deserialize, Serialize};

use crate::extraction::family::ModelFamily;

/// Literal marker written in place of an unresolved rating or rationale.
///
/// Downstream comparison tooling matches this token bit-for-bit, so it is
/// a first-class "unknown" value rather than an absent cell.
pub const SENTINEL: &str = "-";

/// Evaluation protocol a judge model was asked to follow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JudgementKind {
    /// 0/1 correctness verdict
    Boolean,
    /// 1-5 correctness scale
    FiveLevel,
    /// Three-aspect summarization quality
    Summary,
}

impl JudgementKind {
    /// Aspects judged under this protocol, in output order.
    pub fn aspects(&self) -> &'static [Aspect] {
        match self {
            JudgementKind::Boolean | JudgementKind::FiveLevel => &[Aspect::Correctness],
            JudgementKind::Summary => &[
                Aspect::ContentAdequacy,
                Aspect::Conciseness,
                Aspect::FluencyAndUnderstandability,
            ],
        }
    }
}

/// One named dimension of a judgement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aspect {
    Correctness,
    ContentAdequacy,
    Conciseness,
    FluencyAndUnderstandability,
}

impl Aspect {
    pub fn canonical_name(&self) -> &'static str {
        match self {
            Aspect::Correctness => "correctness",
            Aspect::ContentAdequacy => "content_adequacy",
            Aspect::Conciseness => "conciseness",
            Aspect::FluencyAndUnderstandability => "fluency_and_understandability",
        }
    }

    /// Map an aspect label as it appears in judge output to its canonical
    /// aspect. Labels are case-folded and `&` collapses to `and`, so
    /// "Fluency & Understandability" and "Fluency and Understandability"
    /// name the same aspect.
    pub fn from_label(label: &str) -> Option<Aspect> {
        let folded = label.to_lowercase().replace('&', "and");
        match folded.trim() {
            "correctness" => Some(Aspect::Correctness),
            "content adequacy" => Some(Aspect::ContentAdequacy),
            "conciseness" => Some(Aspect::Conciseness),
            "fluency and understandability" => Some(Aspect::FluencyAndUnderstandability),
            _ => None,
        }
    }
}

impl std::fmt::Display for Aspect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.canonical_name())
    }
}

/// One collected judge response, not yet parsed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawJudgement {
    /// Identifier of the judged record (method id, benchmark target id, ...)
    pub record_id: String,
    /// The entity being judged, typically the model that generated the
    /// candidate under evaluation
    pub judged_entity: String,
    /// Family of the judge model that produced the text
    pub family: ModelFamily,
    /// Protocol the judge was asked to follow
    pub kind: JudgementKind,
    /// Raw text returned by the judge
    pub raw_text: String,
}

/// Rating and rationale recovered for one aspect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedRating {
    pub aspect: Aspect,
    /// Literal rating token found in the text, or the sentinel. Kept as a
    /// string to preserve forms like a bare digit.
    pub rating: String,
    pub rationale: String,
}

impl ExtractedRating {
    /// Sentinel-filled rating for an aspect no rule matched.
    pub fn unresolved(aspect: Aspect) -> Self {
        Self {
            aspect,
            rating: SENTINEL.to_string(),
            rationale: SENTINEL.to_string(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.rating != SENTINEL || self.rationale != SENTINEL
    }
}

/// Fully resolved judgement for one (record, judged entity) pair.
///
/// Holds exactly one `ExtractedRating` per aspect of the requested kind,
/// in the kind's canonical aspect order. Built in a single resolver call
/// and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredJudgement {
    pub record_id: String,
    pub judged_entity: String,
    pub ratings: Vec<ExtractedRating>,
}

impl StructuredJudgement {
    pub fn rating_for(&self, aspect: Aspect) -> Option<&ExtractedRating> {
        self.ratings.iter().find(|r| r.aspect == aspect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_kind_has_three_aspects_in_canonical_order() {
        let aspects = JudgementKind::Summary.aspects();
        assert_eq!(
            aspects,
            &[
                Aspect::ContentAdequacy,
                Aspect::Conciseness,
                Aspect::FluencyAndUnderstandability,
            ]
        );
    }

    #[test]
    fn scalar_kinds_have_single_correctness_aspect() {
        assert_eq!(JudgementKind::Boolean.aspects(), &[Aspect::Correctness]);
        assert_eq!(JudgementKind::FiveLevel.aspects(), &[Aspect::Correctness]);
    }

    #[test]
    fn ampersand_label_collapses_to_canonical_aspect() {
        assert_eq!(
            Aspect::from_label("Fluency & Understandability"),
            Some(Aspect::FluencyAndUnderstandability)
        );
        assert_eq!(
            Aspect::from_label("Fluency and Understandability"),
            Some(Aspect::FluencyAndUnderstandability)
        );
        assert_eq!(
            Aspect::from_label("CONTENT ADEQUACY"),
            Some(Aspect::ContentAdequacy)
        );
        assert_eq!(Aspect::from_label("elegance"), None);
    }

    #[test]
    fn unresolved_rating_carries_sentinel_on_both_halves() {
        let rating = ExtractedRating::unresolved(Aspect::Conciseness);
        assert_eq!(rating.rating, SENTINEL);
        assert_eq!(rating.rationale, SENTINEL);
        assert!(!rating.is_resolved());
    }
}
