use derive_more::derive::Display;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};

/// Routing prefix some completion libraries put in front of Bedrock ids.
const BEDROCK_ROUTE_PREFIX: &str = "bedrock/";

const REGIONAL_PREFIXES: [&str; 4] = ["us.", "eu.", "apac.", "au."];

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize, Hash, Eq, Display)]
#[serde(transparent)]
pub struct ModelId(String);

impl ModelId {
    pub fn new<T: Into<String>>(id: T) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The identifier Bedrock itself understands, without any routing
    /// prefix.
    pub fn bedrock_id(&self) -> &str {
        self.0.strip_prefix(BEDROCK_ROUTE_PREFIX).unwrap_or(&self.0)
    }

    /// Resolves the id to the cross-region inference profile for `region`.
    ///
    /// Only Anthropic models are prefixed, and ids that already carry a
    /// regional or `global.` prefix are returned untouched.
    pub fn inference_profile_id(&self, region: &Region) -> String {
        let model_id = self.bedrock_id();
        if model_id.starts_with("global.") {
            return model_id.to_string();
        }

        let prefix = match region.as_str() {
            r if r.starts_with("us-") && !r.contains("gov") => "us.",
            r if r.starts_with("eu-") => "eu.",
            "ap-southeast-2" => "au.",
            r if r.starts_with("ap-") => "apac.",
            _ => "",
        };

        if model_id.contains("anthropic.")
            && !REGIONAL_PREFIXES.iter().any(|p| model_id.starts_with(p))
        {
            format!("{prefix}{model_id}")
        } else {
            model_id.to_string()
        }
    }
}

impl From<String> for ModelId {
    fn from(value: String) -> Self {
        ModelId(value)
    }
}

impl From<&str> for ModelId {
    fn from(value: &str) -> Self {
        ModelId(value.to_string())
    }
}

/// An AWS region name such as `us-east-1`.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize, Hash, Eq, Display)]
#[serde(transparent)]
pub struct Region(String);

impl Region {
    pub fn new<T: Into<String>>(name: T) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Region {
    fn from(value: &str) -> Self {
        Region(value.to_string())
    }
}

impl From<String> for Region {
    fn from(value: String) -> Self {
        Region(value)
    }
}

/// Summary of a foundation model as reported by the Bedrock control plane.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Setters)]
#[setters(into, strip_option)]
pub struct FoundationModel {
    pub id: ModelId,
    pub name: Option<String>,
    pub provider: Option<String>,
    pub input_modalities: Vec<String>,
    pub output_modalities: Vec<String>,
}

impl FoundationModel {
    pub fn new(id: impl Into<ModelId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            provider: None,
            input_modalities: Vec::new(),
            output_modalities: Vec::new(),
        }
    }

    /// Case-insensitive match of `needle` against the model name.
    pub fn name_contains(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name
            .as_deref()
            .is_some_and(|name| name.to_lowercase().contains(&needle))
    }
}
