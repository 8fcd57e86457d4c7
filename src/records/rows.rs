//! Tabular Record Shapes
//!
//! The surrounding experiment runner reads judge outputs from delimited
//! files into rows and writes extraction results back out. This module
//! fixes the minimal row shapes and column conventions on both sides; it
//! owns no file I/O itself.

use std::collections::BTreeMap;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::extraction::family::ModelFamily;
use crate::extraction::resolver::Resolver;
use crate::extraction::types::{
    Aspect, ExtractedRating, JudgementKind, RawJudgement, SENTINEL,
};

/// One tabular input row: column name → cell text. Missing cells behave
/// as empty judge output (all aspects sentinel), matching runs where the
/// upstream model call failed.
pub type Row = BTreeMap<String, String>;

/// Column-name infix marking a judgement text cell; the prefix before it
/// is the judged model.
pub const JUDGEMENT_INFIX: &str = "_judgement";

/// Column holding the judge's raw output in summarization tables.
pub const MODEL_OUTPUT_COLUMN: &str = "model_output";

/// Accepted record-identifier columns, probed in order.
const ID_COLUMNS: [&str; 2] = ["id", "target_id"];

/// Output row for boolean and five-level judgement tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingRow {
    pub id: String,
    pub judged_model: String,
    pub rating: String,
    pub rationale: String,
}

/// Output row for summarization-quality tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub id: String,
    pub generated_by: String,
    pub content_adequacy: String,
    pub conciseness: String,
    pub fluency: String,
}

/// Conventional suffixed column header for one judge family and aspect,
/// e.g. `gpt-4-turbo_CA`, `gpt-4-turbo_Conciseness`, `gpt-4-turbo_Fluency`.
pub fn aspect_column(family: ModelFamily, aspect: Aspect) -> String {
    let suffix = match aspect {
        Aspect::ContentAdequacy => "CA",
        Aspect::Conciseness => "Conciseness",
        Aspect::FluencyAndUnderstandability => "Fluency",
        Aspect::Correctness => "Rating",
    };
    format!("{family}_{suffix}")
}

fn row_id<'a>(row: &'a Row, index: usize) -> Result<&'a str> {
    for column in ID_COLUMNS {
        if let Some(id) = row.get(column) {
            return Ok(id.as_str());
        }
    }
    bail!("row {index} has no record identifier column (expected one of {ID_COLUMNS:?})")
}

/// Extract one `RatingRow` per (row × judgement column) from a boolean or
/// five-level judgement table. Judgement cells are located by the
/// `_judgement` column convention; the column prefix is the judged model.
pub fn extract_rating_rows(
    rows: &[Row],
    family: ModelFamily,
    kind: JudgementKind,
    resolver: &Resolver,
) -> Result<Vec<RatingRow>> {
    if kind == JudgementKind::Summary {
        bail!("summarization tables carry per-aspect columns; use extract_summary_rows");
    }

    let mut out = Vec::new();
    for (index, row) in rows.iter().enumerate() {
        let id = row_id(row, index)?;
        for (column, cell) in row {
            if !column.contains(JUDGEMENT_INFIX) {
                continue;
            }
            let judged_model = column.split(JUDGEMENT_INFIX).next().unwrap_or(column.as_str());
            let judgement = resolver.resolve(&RawJudgement {
                record_id: id.to_string(),
                judged_entity: judged_model.to_string(),
                family,
                kind,
                raw_text: cell.clone(),
            });
            let rating = judgement
                .ratings
                .into_iter()
                .next()
                .unwrap_or_else(|| ExtractedRating::unresolved(Aspect::Correctness));
            out.push(RatingRow {
                id: id.to_string(),
                judged_model: judged_model.to_string(),
                rating: rating.rating,
                rationale: rating.rationale,
            });
        }
    }
    debug!(rows = out.len(), %family, "extracted rating rows");
    Ok(out)
}

/// Extract one `SummaryRow` per input row from a summarization-quality
/// table. The judge text lives in the `model_output` column; a missing
/// cell is treated as empty output.
pub fn extract_summary_rows(
    rows: &[Row],
    family: ModelFamily,
    resolver: &Resolver,
) -> Result<Vec<SummaryRow>> {
    let mut out = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let id = row_id(row, index)?;
        let generated_by = row
            .get("generated_by")
            .cloned()
            .unwrap_or_else(|| SENTINEL.to_string());
        let raw_text = row.get(MODEL_OUTPUT_COLUMN).cloned().unwrap_or_default();

        let judgement = resolver.resolve(&RawJudgement {
            record_id: id.to_string(),
            judged_entity: generated_by.clone(),
            family,
            kind: JudgementKind::Summary,
            raw_text,
        });
        let value = |aspect: Aspect| {
            judgement
                .rating_for(aspect)
                .map(|r| r.rating.clone())
                .unwrap_or_else(|| SENTINEL.to_string())
        };

        out.push(SummaryRow {
            id: id.to_string(),
            generated_by,
            content_adequacy: value(Aspect::ContentAdequacy),
            conciseness: value(Aspect::Conciseness),
            fluency: value(Aspect::FluencyAndUnderstandability),
        });
    }
    debug!(rows = out.len(), %family, "extracted summary rows");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(&str, &str)]) -> Row {
        cells
            .iter()
            .map(|(column, text)| (column.to_string(), text.to_string()))
            .collect()
    }

    #[test]
    fn one_rating_row_per_judgement_column() {
        let resolver = Resolver::default();
        let rows = vec![row(&[
            ("id", "m-7"),
            ("target", "public int add(int a, int b)"),
            (
                "gpt-3.5-turbo_judgement",
                "# Rating\n1\n# Rationale\nImplements the description.",
            ),
            ("CodeLlama-7b-Instruct-hf_judgement", "no structure here"),
        ])];

        let extracted = extract_rating_rows(
            &rows,
            ModelFamily::Gpt4Turbo,
            JudgementKind::Boolean,
            &resolver,
        )
        .unwrap();

        assert_eq!(extracted.len(), 2);
        // BTreeMap iteration is column-name order
        assert_eq!(extracted[0].judged_model, "CodeLlama-7b-Instruct-hf");
        assert_eq!(extracted[0].rating, SENTINEL);
        assert_eq!(extracted[1].judged_model, "gpt-3.5-turbo");
        assert_eq!(extracted[1].rating, "1");
        assert_eq!(extracted[1].rationale, "Implements the description.");
    }

    #[test]
    fn missing_id_column_is_an_error() {
        let resolver = Resolver::default();
        let rows = vec![row(&[("gpt-4-turbo_judgement", "# Rating\n1\n# Rationale\nok")])];
        let err = extract_rating_rows(
            &rows,
            ModelFamily::Gpt4Turbo,
            JudgementKind::Boolean,
            &resolver,
        )
        .unwrap_err();
        assert!(err.to_string().contains("record identifier"));
    }

    #[test]
    fn summary_kind_is_rejected_by_rating_driver() {
        let resolver = Resolver::default();
        let err = extract_rating_rows(
            &[],
            ModelFamily::Gpt4Turbo,
            JudgementKind::Summary,
            &resolver,
        )
        .unwrap_err();
        assert!(err.to_string().contains("extract_summary_rows"));
    }

    #[test]
    fn summary_rows_fill_aspect_columns() {
        let resolver = Resolver::default();
        let rows = vec![
            row(&[
                ("target_id", "cs-1"),
                ("generated_by", "CodeLlama-7b-Instruct-hf"),
                (
                    MODEL_OUTPUT_COLUMN,
                    "Content Adequacy: 5\nConciseness: 3\nFluency and Understandability: 4",
                ),
            ]),
            // missing model_output behaves as empty judge output
            row(&[("target_id", "cs-2"), ("generated_by", "gpt-3.5-turbo")]),
        ];

        let extracted =
            extract_summary_rows(&rows, ModelFamily::CodeLlama7b, &resolver).unwrap();

        assert_eq!(extracted.len(), 2);
        assert_eq!(extracted[0].content_adequacy, "5");
        assert_eq!(extracted[0].conciseness, "3");
        assert_eq!(extracted[0].fluency, "4");
        assert_eq!(extracted[1].content_adequacy, SENTINEL);
        assert_eq!(extracted[1].conciseness, SENTINEL);
        assert_eq!(extracted[1].fluency, SENTINEL);
    }

    #[test]
    fn missing_generated_by_is_sentinel() {
        let resolver = Resolver::default();
        let rows = vec![row(&[("id", "cs-9"), (MODEL_OUTPUT_COLUMN, "")])];
        let extracted =
            extract_summary_rows(&rows, ModelFamily::Gpt35Turbo, &resolver).unwrap();
        assert_eq!(extracted[0].generated_by, SENTINEL);
    }

    #[test]
    fn aspect_columns_follow_the_suffix_convention() {
        assert_eq!(
            aspect_column(ModelFamily::Gpt4Turbo, Aspect::ContentAdequacy),
            "gpt-4-turbo_CA"
        );
        assert_eq!(
            aspect_column(ModelFamily::CodeLlama7b, Aspect::Conciseness),
            "CodeLlama-7b-Instruct-hf_Conciseness"
        );
        assert_eq!(
            aspect_column(ModelFamily::Gpt35Turbo, Aspect::FluencyAndUnderstandability),
            "gpt-3.5-turbo_Fluency"
        );
    }

    #[test]
    fn rating_rows_serialize_with_tabular_field_names() {
        let row = RatingRow {
            id: "m-1".to_string(),
            judged_model: "gpt-4-turbo".to_string(),
            rating: "1".to_string(),
            rationale: SENTINEL.to_string(),
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["id"], "m-1");
        assert_eq!(json["judged_model"], "gpt-4-turbo");
        assert_eq!(json["rating"], "1");
        assert_eq!(json["rationale"], "-");
    }
}
