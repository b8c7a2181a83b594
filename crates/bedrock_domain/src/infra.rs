use std::path::Path;
use std::time::Duration;

use crate::{
    ChatMessage, CompletionParams, CompletionResponse, FoundationModel, ModelId, ProviderError,
    Region, ResolvedCredentials,
};

/// Resolves credentials through the SDK's default provider chain.
#[async_trait::async_trait]
pub trait CredentialInfra: Send + Sync {
    /// Returns `Ok(None)` when the chain is empty rather than failing.
    async fn resolve_credentials(
        &self,
        region: &Region,
    ) -> Result<Option<ResolvedCredentials>, ProviderError>;
}

/// Read access to the Bedrock control plane.
#[async_trait::async_trait]
pub trait CatalogInfra: Send + Sync {
    /// Lists every foundation model offered in `region`.
    async fn list_foundation_models(
        &self,
        region: &Region,
    ) -> Result<Vec<FoundationModel>, ProviderError>;

    /// Describes a single model; fails with the service error code when the
    /// model is unknown in the region or not accessible.
    async fn get_foundation_model(
        &self,
        region: &Region,
        model: &ModelId,
    ) -> Result<FoundationModel, ProviderError>;
}

/// A single, non-streaming chat completion against one model.
#[async_trait::async_trait]
pub trait CompletionInfra: Send + Sync {
    async fn complete(
        &self,
        model: &ModelId,
        messages: &[ChatMessage],
        params: &CompletionParams,
    ) -> Result<CompletionResponse, ProviderError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

#[async_trait::async_trait]
pub trait CommandInfra: Send + Sync {
    /// Runs `program` with `args`, failing if it cannot be spawned or does
    /// not finish within `timeout`.
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> anyhow::Result<CommandOutput>;
}

#[async_trait::async_trait]
pub trait FileInfra: Send + Sync {
    async fn write(&self, path: &Path, contents: &str) -> anyhow::Result<()>;
}
