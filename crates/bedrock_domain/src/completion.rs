use std::time::Duration;

use derive_setters::Setters;
use serde::{Deserialize, Serialize};

use crate::{Classification, ModelId};

/// Inference parameters forwarded with every completion attempt.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Setters)]
#[setters(strip_option)]
#[serde(default)]
pub struct CompletionParams {
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub max_tokens: Option<u32>,
    #[setters(into)]
    pub stop: Vec<String>,
    /// Upper bound for a single attempt, not for the whole fallback chain.
    #[serde(default, with = "duration_secs")]
    pub timeout: Option<Duration>,
}

impl Default for CompletionParams {
    fn default() -> Self {
        Self {
            temperature: Some(0.7),
            top_p: None,
            max_tokens: Some(1000),
            stop: Vec::new(),
            timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl CompletionParams {
    /// Layers explicitly set values from `overrides` on top of `self`.
    pub fn merge(self, overrides: CompletionParams) -> Self {
        Self {
            temperature: overrides.temperature.or(self.temperature),
            top_p: overrides.top_p.or(self.top_p),
            max_tokens: overrides.max_tokens.or(self.max_tokens),
            stop: if overrides.stop.is_empty() { self.stop } else { overrides.stop },
            timeout: overrides.timeout.or(self.timeout),
        }
    }

    /// A parameter set where nothing is set; useful as an override base.
    pub fn empty() -> Self {
        Self { temperature: None, top_p: None, max_tokens: None, stop: Vec::new(), timeout: None }
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(duration) => s.serialize_some(&duration.as_secs()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(d)?.map(Duration::from_secs))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub total_tokens: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub text: String,
    pub usage: Option<Usage>,
}

/// Result of running a conversation through the candidate model chain.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CompletionOutcome {
    Success {
        model: ModelId,
        text: String,
        usage: Option<Usage>,
    },
    Failure {
        error: String,
        tried_models: Vec<ModelId>,
        classification: Classification,
        suggestions: Vec<String>,
    },
}

impl CompletionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The response text on success, the last error on failure.
    pub fn message(&self) -> &str {
        match self {
            Self::Success { text, .. } => text,
            Self::Failure { error, .. } => error,
        }
    }

    pub fn suggestions(&self) -> &[String] {
        match self {
            Self::Success { .. } => &[],
            Self::Failure { suggestions, .. } => suggestions,
        }
    }
}
