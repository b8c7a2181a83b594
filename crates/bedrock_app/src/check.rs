use std::sync::Arc;

use bedrock_config::{AwsEnvironment, BedrockConfig};
use bedrock_domain::{CatalogInfra, CheckReport, CredentialInfra};
use tracing::{info, warn};

use crate::{AccessProbe, CredentialProbe, RegionProbe};

/// Full availability check: credentials, then regions, then per-model
/// access in the most promising regions.
pub struct AvailabilityCheck<I> {
    infra: Arc<I>,
    config: Arc<BedrockConfig>,
}

impl<I: CredentialInfra + CatalogInfra> AvailabilityCheck<I> {
    pub fn new(infra: Arc<I>, config: Arc<BedrockConfig>) -> Self {
        Self { infra, config }
    }

    pub async fn run(&self, env: &AwsEnvironment) -> CheckReport {
        let credentials = CredentialProbe::new(self.infra.clone(), self.config.clone())
            .report(env)
            .await;
        if !credentials.is_ok() {
            warn!("Credentials could not be resolved, skipping region checks");
            return CheckReport {
                credentials,
                regions: Vec::new(),
                access: Vec::new(),
                recommended_region: None,
            };
        }

        let regions = RegionProbe::new(self.infra.clone(), self.config.clone())
            .probe_all(None)
            .await;

        let access_probe = AccessProbe::new(self.infra.clone(), self.config.clone());
        let mut access = Vec::new();
        for region in regions
            .iter()
            .filter(|report| report.has_models())
            .map(|report| &report.region)
            .take(self.config.detailed_region_limit)
        {
            access.push(access_probe.probe(region).await);
        }

        let recommended_region = access
            .iter()
            .find(|report| report.available_count() > 0)
            .map(|report| report.region.clone());
        match &recommended_region {
            Some(region) => info!(region = %region, "Recommended region found"),
            None => warn!("No region offers an immediately usable model"),
        }

        CheckReport { credentials, regions, access, recommended_region }
    }
}

#[cfg(test)]
mod tests {
    use bedrock_domain::{ProviderError, Region};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_utils::{MockInfra, claude};

    fn check(infra: MockInfra) -> (Arc<MockInfra>, AvailabilityCheck<MockInfra>) {
        let infra = Arc::new(infra);
        let config = Arc::new(BedrockConfig::defaults().unwrap());
        (infra.clone(), AvailabilityCheck::new(infra, config))
    }

    fn deny_all(mut infra: MockInfra, region: &str) -> MockInfra {
        for model in BedrockConfig::defaults().unwrap().probe_models {
            infra = infra.denied(
                region,
                model.as_str(),
                ProviderError::service("AccessDeniedException", "denied"),
            );
        }
        infra
    }

    #[tokio::test]
    async fn test_stops_after_missing_credentials() {
        let (infra, fixture) = check(MockInfra::default());

        let actual = fixture.run(&AwsEnvironment::default()).await;

        assert!(!actual.is_ok());
        assert!(actual.regions.is_empty());
        assert!(infra.catalog_calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_recommends_first_region_with_available_model() {
        let infra = MockInfra::default()
            .with_credentials()
            .region("us-east-1", Ok(vec![claude("anthropic.claude-v2")]))
            .region("us-west-2", Ok(vec![claude("anthropic.claude-v2")]))
            .region("eu-central-1", Ok(vec![claude("anthropic.claude-v2")]));
        let infra = deny_all(infra, "us-east-1");
        let (_, fixture) = check(infra);

        let actual = fixture.run(&AwsEnvironment::default()).await;

        assert_eq!(actual.access.len(), 2);
        assert_eq!(actual.access[0].region, Region::from("us-east-1"));
        assert_eq!(actual.access[0].available_count(), 0);
        assert_eq!(actual.recommended_region, Some(Region::from("us-west-2")));
        assert_eq!(actual.available_regions().len(), 3);
    }

    #[tokio::test]
    async fn test_no_region_with_models() {
        let (_, fixture) = check(MockInfra::default().with_credentials());

        let actual = fixture.run(&AwsEnvironment::default()).await;

        assert_eq!(actual.regions.len(), 5);
        assert!(actual.access.is_empty());
        assert_eq!(actual.recommended_region, None);
    }
}
