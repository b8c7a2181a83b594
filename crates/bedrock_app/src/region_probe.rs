use std::sync::Arc;

use bedrock_config::BedrockConfig;
use bedrock_domain::{CatalogInfra, ProviderError, Region, RegionFailure, RegionReport};
use tracing::{debug, info};

/// Enumerates the Claude models each region offers.
pub struct RegionProbe<C> {
    infra: Arc<C>,
    config: Arc<BedrockConfig>,
}

impl<C: CatalogInfra> RegionProbe<C> {
    pub fn new(infra: Arc<C>, config: Arc<BedrockConfig>) -> Self {
        Self { infra, config }
    }

    pub async fn probe_region(&self, region: &Region) -> RegionReport {
        debug!(region = %region, "Listing foundation models");
        let result = match self.infra.list_foundation_models(region).await {
            Ok(models) => {
                let matching: Vec<_> = models
                    .into_iter()
                    .filter(|model| model.name_contains(&self.config.model_name_filter))
                    .collect();
                info!(region = %region, count = matching.len(), "Matching models found");
                Ok(matching)
            }
            Err(error) => Err(region_failure(&error)),
        };

        RegionReport { region: region.clone(), result }
    }

    /// Probes `regions` one after another, defaulting to the configured
    /// list.
    pub async fn probe_all(&self, regions: Option<&[Region]>) -> Vec<RegionReport> {
        let regions = regions.unwrap_or(&self.config.regions_to_check);
        let mut reports = Vec::with_capacity(regions.len());
        for region in regions {
            reports.push(self.probe_region(region).await);
        }
        reports
    }
}

fn region_failure(error: &ProviderError) -> RegionFailure {
    match error.code() {
        Some("UnauthorizedOperation" | "AccessDeniedException") => RegionFailure::NoBedrockAccess,
        Some("InvalidRegionException") => RegionFailure::BedrockUnsupported,
        Some(code) => RegionFailure::Aws(code.to_string()),
        None => RegionFailure::Other(error.to_string()),
    }
}
