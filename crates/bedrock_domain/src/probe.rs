use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::Serialize;

use crate::{CompletionOutcome, FoundationModel, ModelId, Region, mask_secret};

/// Presence of one AWS environment variable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EnvVarStatus {
    pub name: String,
    pub required: bool,
    pub value: Option<String>,
}

impl EnvVarStatus {
    pub fn is_set(&self) -> bool {
        self.value.as_deref().is_some_and(|v| !v.is_empty())
    }

    /// Key and token material is never displayed, only its presence.
    pub fn is_secret(&self) -> bool {
        self.name.contains("KEY") || self.name.contains("TOKEN")
    }

    pub fn display_value(&self) -> Option<String> {
        match self.value.as_deref() {
            Some(value) if !value.is_empty() => {
                if self.is_secret() {
                    Some(format!("{} (set)", "*".repeat(20)))
                } else {
                    Some(value.to_string())
                }
            }
            _ => None,
        }
    }
}

/// Credentials as resolved by the SDK's default provider chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedCredentials {
    pub access_key_id: String,
    pub has_session_token: bool,
    pub expiry: Option<DateTime<Utc>>,
}

impl ResolvedCredentials {
    pub fn masked_access_key(&self) -> String {
        mask_secret(&self.access_key_id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum CredentialResolution {
    Resolved(ResolvedCredentials),
    NotFound,
    Failed(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CredentialReport {
    pub variables: Vec<EnvVarStatus>,
    pub resolution: CredentialResolution,
}

impl CredentialReport {
    pub fn is_ok(&self) -> bool {
        matches!(self.resolution, CredentialResolution::Resolved(_))
    }

    pub fn missing_required(&self) -> Vec<&str> {
        self.variables
            .iter()
            .filter(|v| v.required && !v.is_set())
            .map(|v| v.name.as_str())
            .collect()
    }
}

/// Outcome of validating the environment before issuing completions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EnvironmentCheck {
    pub region: Region,
    pub region_defaulted: bool,
    pub region_supported: bool,
    pub masked_access_key: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Display, Serialize)]
pub enum RegionFailure {
    #[display("no Bedrock access")]
    NoBedrockAccess,
    #[display("Bedrock is not supported in this region")]
    BedrockUnsupported,
    #[display("AWS error: {_0}")]
    Aws(String),
    #[display("error: {_0}")]
    Other(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegionReport {
    pub region: Region,
    pub result: Result<Vec<FoundationModel>, RegionFailure>,
}

impl RegionReport {
    pub fn has_models(&self) -> bool {
        self.result.as_ref().is_ok_and(|models| !models.is_empty())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Display, Serialize)]
pub enum AccessStatus {
    #[display("available")]
    Available,
    #[display("not offered in this region")]
    NotInRegion,
    #[display("access must be requested")]
    AccessRequired,
    #[display("error: {_0}")]
    Error(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ModelAccess {
    pub model: ModelId,
    pub status: AccessStatus,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ModelAccessReport {
    pub region: Region,
    pub models: Vec<ModelAccess>,
}

impl ModelAccessReport {
    pub fn available_count(&self) -> usize {
        self.models
            .iter()
            .filter(|m| m.status == AccessStatus::Available)
            .count()
    }
}

/// Aggregate result of the full availability check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub credentials: CredentialReport,
    pub regions: Vec<RegionReport>,
    pub access: Vec<ModelAccessReport>,
    pub recommended_region: Option<Region>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.recommended_region.is_some()
    }

    pub fn available_regions(&self) -> Vec<&Region> {
        self.regions
            .iter()
            .filter(|r| r.has_models())
            .map(|r| &r.region)
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum CliConfigStatus {
    Configured(String),
    NotConfigured,
    Unavailable(String),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SmokeReport {
    pub credentials: CredentialReport,
    pub region: Region,
    pub models: Option<RegionReport>,
    pub completion: Option<CompletionOutcome>,
}

impl SmokeReport {
    pub fn is_ok(&self) -> bool {
        self.completion.as_ref().is_some_and(CompletionOutcome::is_success)
    }
}
