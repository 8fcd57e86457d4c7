//! Judge Model Families
//!
//! Output formatting conventions drift systematically by generating model,
//! so pattern rules are keyed by family rather than shared globally.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Grouping key selecting which ordered pattern rule list applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelFamily {
    #[serde(rename = "deepseek-coder-1.3b-instruct")]
    DeepseekCoder1_3b,
    #[serde(rename = "deepseek-coder-6.7b-instruct")]
    DeepseekCoder6_7b,
    #[serde(rename = "deepseek-coder-33b-instruct")]
    DeepseekCoder33b,
    #[serde(rename = "CodeLlama-7b-Instruct-hf")]
    CodeLlama7b,
    #[serde(rename = "CodeLlama-13b-Instruct-hf")]
    CodeLlama13b,
    #[serde(rename = "CodeLlama-34b-Instruct-hf")]
    CodeLlama34b,
    #[serde(rename = "gpt-3.5-turbo")]
    Gpt35Turbo,
    #[serde(rename = "gpt-4-turbo")]
    Gpt4Turbo,
}

impl ModelFamily {
    pub const ALL: [ModelFamily; 8] = [
        ModelFamily::DeepseekCoder1_3b,
        ModelFamily::DeepseekCoder6_7b,
        ModelFamily::DeepseekCoder33b,
        ModelFamily::CodeLlama7b,
        ModelFamily::CodeLlama13b,
        ModelFamily::CodeLlama34b,
        ModelFamily::Gpt35Turbo,
        ModelFamily::Gpt4Turbo,
    ];

    /// Canonical model name as it appears in result files.
    pub fn model_name(&self) -> &'static str {
        match self {
            ModelFamily::DeepseekCoder1_3b => "deepseek-coder-1.3b-instruct",
            ModelFamily::DeepseekCoder6_7b => "deepseek-coder-6.7b-instruct",
            ModelFamily::DeepseekCoder33b => "deepseek-coder-33b-instruct",
            ModelFamily::CodeLlama7b => "CodeLlama-7b-Instruct-hf",
            ModelFamily::CodeLlama13b => "CodeLlama-13b-Instruct-hf",
            ModelFamily::CodeLlama34b => "CodeLlama-34b-Instruct-hf",
            ModelFamily::Gpt35Turbo => "gpt-3.5-turbo",
            ModelFamily::Gpt4Turbo => "gpt-4-turbo",
        }
    }
}

impl std::fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.model_name())
    }
}

#[derive(Debug, Error)]
#[error("unrecognized judge model name: {0}")]
pub struct UnknownModelError(pub String);

impl std::str::FromStr for ModelFamily {
    type Err = UnknownModelError;

    /// Accepts fully qualified hub ids ("deepseek-ai/deepseek-coder-1.3b-instruct")
    /// as well as the bare model names used as result-file stems; the
    /// namespace prefix up to the last `/` is discarded.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.rsplit('/').next().unwrap_or(s).trim();
        ModelFamily::ALL
            .iter()
            .copied()
            .find(|family| family.model_name().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownModelError(s.to_string()))
    }
}
