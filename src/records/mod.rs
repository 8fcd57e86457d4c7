//! Records Module
//!
//! Minimal tabular record shapes exchanged with the experiment runner.

pub mod rows;

pub use rows::{
    aspect_column, extract_rating_rows, extract_summary_rows, RatingRow, Row, SummaryRow,
    JUDGEMENT_INFIX, MODEL_OUTPUT_COLUMN,
};
