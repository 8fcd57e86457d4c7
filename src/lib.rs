//! LLM-as-Judge Judgement Extraction
//!
//! Turns free-form judge-model output into structured judgements:
//! - per-model-family ordered pattern banks
//! - boolean, five-level and summarization-quality protocols
//! - sentinel-filling resolution (failure is data, never control flow)
//! - minimal tabular record shapes for the surrounding experiment runner

pub mod extraction;
pub mod records;

// Re-exports for convenience
pub use extraction::{
    Aspect, ExtractedRating, JudgementKind, ModelFamily, PatternBank, RawJudgement, Resolver,
    StructuredJudgement, SENTINEL,
};
pub use records::{extract_rating_rows, extract_summary_rows, RatingRow, Row, SummaryRow};
