use std::sync::Arc;

use aws_sdk_bedrock::Client;
use aws_sdk_bedrock::types::{FoundationModelDetails, FoundationModelSummary, ModelModality};
use bedrock_domain::{CatalogInfra, FoundationModel, ModelId, ProviderError, Region};
use tracing::debug;

use crate::SdkConfigCache;
use crate::error::into_provider_error;

/// Bedrock control-plane client used for model discovery.
pub struct BedrockCatalog {
    configs: Arc<SdkConfigCache>,
}

impl BedrockCatalog {
    pub fn new(configs: Arc<SdkConfigCache>) -> Self {
        Self { configs }
    }

    async fn client(&self, region: &Region) -> Client {
        Client::new(&self.configs.get(region).await)
    }
}

#[async_trait::async_trait]
impl CatalogInfra for BedrockCatalog {
    async fn list_foundation_models(
        &self,
        region: &Region,
    ) -> Result<Vec<FoundationModel>, ProviderError> {
        let output = self
            .client(region)
            .await
            .list_foundation_models()
            .send()
            .await
            .map_err(into_provider_error)?;

        let models: Vec<FoundationModel> =
            output.model_summaries().iter().map(from_summary).collect();
        debug!(region = %region, count = models.len(), "Listed foundation models");
        Ok(models)
    }

    async fn get_foundation_model(
        &self,
        region: &Region,
        model: &ModelId,
    ) -> Result<FoundationModel, ProviderError> {
        let output = self
            .client(region)
            .await
            .get_foundation_model()
            .model_identifier(model.bedrock_id())
            .send()
            .await
            .map_err(into_provider_error)?;

        Ok(output
            .model_details()
            .map(from_details)
            .unwrap_or_else(|| FoundationModel::new(model.bedrock_id())))
    }
}

fn modalities(values: &[ModelModality]) -> Vec<String> {
    values.iter().map(|m| m.as_str().to_string()).collect()
}

fn from_summary(summary: &FoundationModelSummary) -> FoundationModel {
    FoundationModel {
        id: ModelId::new(summary.model_id()),
        name: summary.model_name().map(str::to_string),
        provider: summary.provider_name().map(str::to_string),
        input_modalities: modalities(summary.input_modalities()),
        output_modalities: modalities(summary.output_modalities()),
    }
}

fn from_details(details: &FoundationModelDetails) -> FoundationModel {
    FoundationModel {
        id: ModelId::new(details.model_id()),
        name: details.model_name().map(str::to_string),
        provider: details.provider_name().map(str::to_string),
        input_modalities: modalities(details.input_modalities()),
        output_modalities: modalities(details.output_modalities()),
    }
}
