use bedrock_domain::{EnvVarStatus, Region};
use serde::Serialize;

pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
pub const AWS_REGION: &str = "AWS_REGION";
pub const AWS_SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";
pub const AWS_PROFILE: &str = "AWS_PROFILE";

/// Snapshot of the AWS-related environment taken once at start-up and
/// handed to every probe, so nothing reads or mutates process environment
/// afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AwsEnvironment {
    pub access_key_id: Option<String>,
    #[serde(skip)]
    pub secret_access_key: Option<String>,
    pub region: Option<String>,
    #[serde(skip)]
    pub session_token: Option<String>,
    pub profile: Option<String>,
}

impl AwsEnvironment {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the snapshot from an arbitrary variable lookup. Empty values
    /// count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|value| !value.is_empty());
        Self {
            access_key_id: get(AWS_ACCESS_KEY_ID),
            secret_access_key: get(AWS_SECRET_ACCESS_KEY),
            region: get(AWS_REGION),
            session_token: get(AWS_SESSION_TOKEN),
            profile: get(AWS_PROFILE),
        }
    }

    /// The configured region, or `default` when `AWS_REGION` is unset.
    pub fn region_or(&self, default: &Region) -> Region {
        self.region
            .as_deref()
            .map(Region::from)
            .unwrap_or_else(|| default.clone())
    }

    pub fn has_static_keys(&self) -> bool {
        self.access_key_id.is_some() && self.secret_access_key.is_some()
    }

    /// Status of every AWS variable: required keys first, then optional
    /// ones.
    pub fn variables(&self) -> Vec<EnvVarStatus> {
        [
            (AWS_ACCESS_KEY_ID, true, &self.access_key_id),
            (AWS_SECRET_ACCESS_KEY, true, &self.secret_access_key),
            (AWS_REGION, false, &self.region),
            (AWS_SESSION_TOKEN, false, &self.session_token),
            (AWS_PROFILE, false, &self.profile),
        ]
        .into_iter()
        .map(|(name, required, value)| EnvVarStatus {
            name: name.to_string(),
            required,
            value: value.clone(),
        })
        .collect()
    }
}
