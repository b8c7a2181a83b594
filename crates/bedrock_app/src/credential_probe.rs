use std::sync::Arc;

use bedrock_config::{AwsEnvironment, BedrockConfig};
use bedrock_domain::{
    CredentialInfra, CredentialReport, CredentialResolution, EnvironmentCheck, Error, mask_secret,
};
use tracing::{debug, warn};

pub struct CredentialProbe<C> {
    infra: Arc<C>,
    config: Arc<BedrockConfig>,
}

impl<C: CredentialInfra> CredentialProbe<C> {
    pub fn new(infra: Arc<C>, config: Arc<BedrockConfig>) -> Self {
        Self { infra, config }
    }

    /// Reports environment variables and whether the SDK provider chain
    /// yields credentials.
    pub async fn report(&self, env: &AwsEnvironment) -> CredentialReport {
        let region = env.region_or(&self.config.default_region);
        debug!(region = %region, "Resolving credentials");

        let resolution = match self.infra.resolve_credentials(&region).await {
            Ok(Some(credentials)) => CredentialResolution::Resolved(credentials),
            Ok(None) => CredentialResolution::NotFound,
            Err(error) => CredentialResolution::Failed(error.to_string()),
        };

        CredentialReport { variables: env.variables(), resolution }
    }

    /// Checks that static keys are present before completions are attempted
    /// and settles on a region.
    pub fn check_environment(&self, env: &AwsEnvironment) -> Result<EnvironmentCheck, Error> {
        let missing: Vec<String> = env
            .variables()
            .into_iter()
            .filter(|v| v.required && !v.is_set())
            .map(|v| v.name)
            .collect();
        if !missing.is_empty() {
            return Err(Error::MissingEnvironment { names: missing });
        }

        let region = env.region_or(&self.config.default_region);
        let region_defaulted = env.region.is_none();
        if region_defaulted {
            warn!(region = %region, "AWS_REGION is not set, using the default region");
        }

        let region_supported = self.config.is_supported_region(&region);
        if !region_supported {
            warn!(region = %region, "Region may not support Bedrock");
        }

        Ok(EnvironmentCheck {
            masked_access_key: mask_secret(env.access_key_id.as_deref().unwrap_or_default()),
            region,
            region_defaulted,
            region_supported,
        })
    }
}
