use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use bedrock_config::BedrockConfig;
use bedrock_domain::{
    CatalogInfra, ChatMessage, CommandInfra, CommandOutput, CompletionInfra, CompletionParams,
    CompletionResponse, CredentialInfra, FileInfra, FoundationModel, ModelId, ProviderError,
    Region, ResolvedCredentials,
};

use crate::{
    AwsCredentialResolver, BedrockCatalog, BedrockConverse, CommandRunner, FileWriter,
    SdkConfigCache,
};

/// Production infrastructure: AWS SDK clients plus local process and file
/// access. All AWS services share one SDK config cache.
#[derive(Clone)]
pub struct BedrockInfra {
    credentials: Arc<AwsCredentialResolver>,
    catalog: Arc<BedrockCatalog>,
    converse: Arc<BedrockConverse>,
    command: Arc<CommandRunner>,
    file_writer: Arc<FileWriter>,
}

impl BedrockInfra {
    /// `region` is where completions are sent; probes take their region
    /// per call.
    pub fn new(config: &BedrockConfig, region: Region) -> Self {
        let configs = Arc::new(SdkConfigCache::new());
        Self {
            credentials: Arc::new(AwsCredentialResolver::new(configs.clone())),
            catalog: Arc::new(BedrockCatalog::new(configs.clone())),
            converse: Arc::new(BedrockConverse::new(
                configs,
                region,
                config.use_inference_profile,
            )),
            command: Arc::new(CommandRunner),
            file_writer: Arc::new(FileWriter),
        }
    }
}

#[async_trait::async_trait]
impl CredentialInfra for BedrockInfra {
    async fn resolve_credentials(
        &self,
        region: &Region,
    ) -> Result<Option<ResolvedCredentials>, ProviderError> {
        self.credentials.resolve_credentials(region).await
    }
}

#[async_trait::async_trait]
impl CatalogInfra for BedrockInfra {
    async fn list_foundation_models(
        &self,
        region: &Region,
    ) -> Result<Vec<FoundationModel>, ProviderError> {
        self.catalog.list_foundation_models(region).await
    }

    async fn get_foundation_model(
        &self,
        region: &Region,
        model: &ModelId,
    ) -> Result<FoundationModel, ProviderError> {
        self.catalog.get_foundation_model(region, model).await
    }
}

#[async_trait::async_trait]
impl CompletionInfra for BedrockInfra {
    async fn complete(
        &self,
        model: &ModelId,
        messages: &[ChatMessage],
        params: &CompletionParams,
    ) -> Result<CompletionResponse, ProviderError> {
        self.converse.complete(model, messages, params).await
    }
}

#[async_trait::async_trait]
impl CommandInfra for BedrockInfra {
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> anyhow::Result<CommandOutput> {
        self.command.run(program, args, timeout).await
    }
}

#[async_trait::async_trait]
impl FileInfra for BedrockInfra {
    async fn write(&self, path: &Path, contents: &str) -> anyhow::Result<()> {
        self.file_writer.write(path, contents).await
    }
}
