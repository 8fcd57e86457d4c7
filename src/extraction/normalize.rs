//! Pre-Match Text Normalization
//!
//! Judges decorate ratings inconsistently ("4/5", "1.0"); the pattern bank
//! expects the undecorated tokens. Case and whitespace are left untouched:
//! the patterns themselves tolerate whitespace drift.

use crate::extraction::types::JudgementKind;

/// Strip format noise ahead of pattern matching.
///
/// Every literal `/5` scale suffix is removed for all kinds; boolean
/// judgements additionally collapse float-formatted verdicts (`0.0`,
/// `1.0`) to their integer tokens. Re-applying is a no-op once no such
/// substrings remain.
pub fn normalize(text: &str, kind: JudgementKind) -> String {
    let stripped = text.replace("/5", "");
    match kind {
        JudgementKind::Boolean => stripped.replace("0.0", "0").replace("1.0", "1"),
        JudgementKind::FiveLevel | JudgementKind::Summary => stripped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_scale_suffix_for_every_kind() {
        for kind in [
            JudgementKind::Boolean,
            JudgementKind::FiveLevel,
            JudgementKind::Summary,
        ] {
            assert_eq!(normalize("Rating: 4/5", kind), "Rating: 4");
        }
    }

    #[test]
    fn collapses_float_verdicts_for_boolean_only() {
        assert_eq!(
            normalize("# Rating\n1.0\n# Rationale\nok", JudgementKind::Boolean),
            "# Rating\n1\n# Rationale\nok"
        );
        assert_eq!(
            normalize("# Rating\n0.0", JudgementKind::Boolean),
            "# Rating\n0"
        );
        // untouched under the other protocols
        assert_eq!(
            normalize("# Rating\n1.0", JudgementKind::FiveLevel),
            "# Rating\n1.0"
        );
        assert_eq!(normalize("score 0.0", JudgementKind::Summary), "score 0.0");
    }

    #[test]
    fn normalization_is_idempotent() {
        let inputs = [
            "# Content Adequacy: 5/5\n# Conciseness: 3",
            "# Rating\n1.0\n# Rationale\nThe loop is fine.",
            "plain text with no decorations",
            "",
        ];
        for kind in [
            JudgementKind::Boolean,
            JudgementKind::FiveLevel,
            JudgementKind::Summary,
        ] {
            for input in inputs {
                let once = normalize(input, kind);
                assert_eq!(normalize(&once, kind), once);
            }
        }
    }

    #[test]
    fn preserves_case_and_whitespace() {
        let text = "  ## RATING:   4/5  ";
        assert_eq!(normalize(text, JudgementKind::Summary), "  ## RATING:   4  ");
    }
}
