//! Judgement Extraction
//!
//! Recovers structured ratings and rationales from free-form judge-model
//! output, tolerating the formatting drift across model families. Three
//! cooperating stages: the normalizer strips format noise, the pattern
//! bank holds the per-family ordered rule lists, and the resolver applies
//! them and assembles the structured judgement.

pub mod bank;
pub mod family;
pub mod normalize;
pub mod resolver;
pub mod types;

pub use bank::{AspectPolicy, PatternBank, PatternRule, VerdictFallback};
pub use family::{ModelFamily, UnknownModelError};
pub use normalize::normalize;
pub use resolver::{Resolver, DEFAULT_RESOLVER};
pub use types::{
    Aspect, ExtractedRating, JudgementKind, RawJudgement, StructuredJudgement, SENTINEL,
};
