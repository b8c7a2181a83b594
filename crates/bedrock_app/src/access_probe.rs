use std::sync::Arc;

use bedrock_config::BedrockConfig;
use bedrock_domain::{
    AccessStatus, CatalogInfra, ModelAccess, ModelAccessReport, ModelId, ProviderError, Region,
    truncate_chars,
};
use tracing::debug;

const ERROR_EXCERPT_CHARS: usize = 50;

/// Describes each probe model individually to learn whether the caller may
/// invoke it.
pub struct AccessProbe<C> {
    infra: Arc<C>,
    config: Arc<BedrockConfig>,
}

impl<C: CatalogInfra> AccessProbe<C> {
    pub fn new(infra: Arc<C>, config: Arc<BedrockConfig>) -> Self {
        Self { infra, config }
    }

    pub async fn probe(&self, region: &Region) -> ModelAccessReport {
        let mut models = Vec::with_capacity(self.config.probe_models.len());
        for model in &self.config.probe_models {
            models.push(self.probe_model(region, model).await);
        }
        ModelAccessReport { region: region.clone(), models }
    }

    async fn probe_model(&self, region: &Region, model: &ModelId) -> ModelAccess {
        debug!(region = %region, model = %model, "Describing foundation model");
        let status = match self.infra.get_foundation_model(region, model).await {
            Ok(_) => AccessStatus::Available,
            Err(error) => access_status(&error),
        };
        ModelAccess { model: model.clone(), status }
    }
}

fn access_status(error: &ProviderError) -> AccessStatus {
    match error.code() {
        Some("ResourceNotFoundException") => AccessStatus::NotInRegion,
        Some("AccessDeniedException") => AccessStatus::AccessRequired,
        Some(code) => AccessStatus::Error(code.to_string()),
        None => AccessStatus::Error(truncate_chars(&error.to_string(), ERROR_EXCERPT_CHARS)),
    }
}
