use std::sync::Arc;

use bedrock_config::{AwsEnvironment, BedrockConfig};
use bedrock_domain::{
    CatalogInfra, ChatMessage, CompletionInfra, CompletionParams, CredentialInfra, SmokeReport,
};
use tracing::{info, warn};

use crate::{CredentialProbe, FallbackDispatcher, RegionProbe};

const SMOKE_SYSTEM_PROMPT: &str = "You are a helpful assistant.";
const SMOKE_USER_PROMPT: &str = "Hello! Please respond with 'Connection successful!'";

/// End-to-end connectivity test: credentials, model listing in the
/// configured region, then one short completion through the fallback chain.
pub struct SmokeTest<I> {
    infra: Arc<I>,
    config: Arc<BedrockConfig>,
}

impl<I: CredentialInfra + CatalogInfra + CompletionInfra> SmokeTest<I> {
    pub fn new(infra: Arc<I>, config: Arc<BedrockConfig>) -> Self {
        Self { infra, config }
    }

    pub fn messages() -> Vec<ChatMessage> {
        vec![ChatMessage::system(SMOKE_SYSTEM_PROMPT), ChatMessage::user(SMOKE_USER_PROMPT)]
    }

    pub fn params() -> CompletionParams {
        CompletionParams::empty().max_tokens(50u32).temperature(0.1)
    }

    pub async fn run(&self, env: &AwsEnvironment) -> SmokeReport {
        let region = env.region_or(&self.config.default_region);
        let credentials = CredentialProbe::new(self.infra.clone(), self.config.clone())
            .report(env)
            .await;
        if !credentials.is_ok() {
            warn!("Smoke test aborted: no credentials");
            return SmokeReport { credentials, region, models: None, completion: None };
        }

        let models = RegionProbe::new(self.infra.clone(), self.config.clone())
            .probe_region(&region)
            .await;

        let completion = FallbackDispatcher::new(self.infra.clone(), self.config.clone())
            .complete(
                Self::messages().iter().map(ChatMessage::to_value).collect(),
                None,
                Self::params(),
            )
            .await;
        info!(success = completion.is_success(), "Smoke test finished");

        SmokeReport { credentials, region, models: Some(models), completion: Some(completion) }
    }
}
