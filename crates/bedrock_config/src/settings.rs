use std::time::Duration;

use bedrock_domain::{CompletionParams, ModelId, Region};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};

/// Embedded defaults, compiled into the binary.
const DEFAULT_CONFIG: &str = include_str!("../bedrock.json");

/// Keys whose environment overrides are comma separated lists.
const LIST_KEYS: [&str; 4] = [
    "supported_regions",
    "regions_to_check",
    "probe_models",
    "candidate_models",
];

/// Static facts about a Bedrock region shown by the setup guide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionInfo {
    pub region: Region,
    pub name: String,
    pub claude_families: Vec<String>,
    pub recommended: bool,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Setters)]
#[setters(into)]
pub struct BedrockConfig {
    /// Region used when `AWS_REGION` is not set.
    pub default_region: Region,
    /// Regions known to host Bedrock; others trigger a warning.
    pub supported_regions: Vec<Region>,
    /// Regions enumerated by the availability check, in priority order.
    pub regions_to_check: Vec<Region>,
    /// How many Claude-hosting regions get the per-model access probe.
    pub detailed_region_limit: usize,
    /// Case-insensitive substring selecting models by name.
    pub model_name_filter: String,
    /// Models described one by one by the access probe.
    pub probe_models: Vec<ModelId>,
    /// Ordered fallback chain for completions.
    pub candidate_models: Vec<ModelId>,
    pub completion: CompletionParams,
    /// Route Anthropic models through cross-region inference profiles.
    pub use_inference_profile: bool,
    /// Timeout for the `aws configure list` check.
    pub cli_timeout_secs: u64,
    /// Number of models listed by the smoke test.
    pub preview_limit: usize,
    pub region_catalog: Vec<RegionInfo>,
}

impl BedrockConfig {
    /// Loads configuration from the embedded defaults, overridden by
    /// environment variables prefixed with `BEDROCK_`.
    ///
    /// Nested keys use a double underscore, list values are comma
    /// separated:
    /// - `BEDROCK_DEFAULT_REGION=us-west-2`
    /// - `BEDROCK_COMPLETION__MAX_TOKENS=512`
    /// - `BEDROCK_CANDIDATE_MODELS=anthropic.claude-v2:1,anthropic.claude-v2`
    ///
    /// # Errors
    /// Returns an error if an override cannot be parsed into the expected
    /// type.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_environment(Self::env_source())
    }

    /// Loads only the embedded defaults.
    pub fn defaults() -> Result<Self, config::ConfigError> {
        Self::builder().build()?.try_deserialize()
    }

    fn from_environment(env: config::Environment) -> Result<Self, config::ConfigError> {
        Self::builder().add_source(env).build()?.try_deserialize()
    }

    fn builder() -> config::ConfigBuilder<config::builder::DefaultState> {
        config::Config::builder().add_source(config::File::from_str(
            DEFAULT_CONFIG,
            config::FileFormat::Json,
        ))
    }

    fn env_source() -> config::Environment {
        let env = config::Environment::with_prefix("BEDROCK")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .list_separator(",");
        LIST_KEYS
            .iter()
            .fold(env, |env, key| env.with_list_parse_key(key))
    }

    pub fn cli_timeout(&self) -> Duration {
        Duration::from_secs(self.cli_timeout_secs)
    }

    pub fn is_supported_region(&self, region: &Region) -> bool {
        self.supported_regions.contains(region)
    }

    /// Whether `model` belongs to the configured candidate chain. Routing
    /// prefixes are ignored on both sides.
    pub fn is_candidate(&self, model: &ModelId) -> bool {
        self.candidate_models
            .iter()
            .any(|candidate| candidate.bedrock_id() == model.bedrock_id())
    }
}
