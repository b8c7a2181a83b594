use std::sync::Arc;

use bedrock_config::{AwsEnvironment, BedrockConfig};
use bedrock_domain::{
    CheckReport, CompletionOutcome, CompletionParams, CredentialReport, EnvironmentCheck, Error,
    ModelAccessReport, ModelId, Region, RegionReport, SmokeReport,
};
use serde_json::Value;

use crate::{
    AccessProbe, AvailabilityCheck, CredentialProbe, Demo, DemoResult, FallbackDispatcher,
    Infrastructure, RegionProbe, SetupGuide, SmokeTest,
};

/// Entry point tying the probes and the dispatcher to one infrastructure,
/// one configuration and one environment snapshot.
pub struct BedrockApp<I> {
    infra: Arc<I>,
    config: Arc<BedrockConfig>,
    env: AwsEnvironment,
}

impl<I: Infrastructure> BedrockApp<I> {
    pub fn new(infra: Arc<I>, config: BedrockConfig, env: AwsEnvironment) -> Self {
        Self { infra, config: Arc::new(config), env }
    }

    pub fn config(&self) -> &BedrockConfig {
        &self.config
    }

    pub fn env(&self) -> &AwsEnvironment {
        &self.env
    }

    /// The region every single-region operation uses.
    pub fn region(&self) -> Region {
        self.env.region_or(&self.config.default_region)
    }

    pub async fn credentials(&self) -> CredentialReport {
        CredentialProbe::new(self.infra.clone(), self.config.clone())
            .report(&self.env)
            .await
    }

    /// # Errors
    /// Fails when a required AWS variable is unset.
    pub fn check_environment(&self) -> Result<EnvironmentCheck, Error> {
        CredentialProbe::new(self.infra.clone(), self.config.clone()).check_environment(&self.env)
    }

    pub async fn regions(&self, regions: Option<&[Region]>) -> Vec<RegionReport> {
        RegionProbe::new(self.infra.clone(), self.config.clone())
            .probe_all(regions)
            .await
    }

    pub async fn access(&self, region: Option<Region>) -> ModelAccessReport {
        let region = region.unwrap_or_else(|| self.region());
        AccessProbe::new(self.infra.clone(), self.config.clone())
            .probe(&region)
            .await
    }

    pub async fn check(&self) -> CheckReport {
        AvailabilityCheck::new(self.infra.clone(), self.config.clone())
            .run(&self.env)
            .await
    }

    pub async fn chat(
        &self,
        messages: Vec<Value>,
        preferred: Option<ModelId>,
        overrides: CompletionParams,
    ) -> CompletionOutcome {
        FallbackDispatcher::new(self.infra.clone(), self.config.clone())
            .complete(messages, preferred, overrides)
            .await
    }

    /// # Errors
    /// Fails before any completion is sent when a required AWS variable is
    /// unset.
    pub async fn demo(&self) -> Result<Vec<DemoResult>, Error> {
        self.check_environment()?;
        Ok(Demo::new(self.infra.clone(), self.config.clone()).run().await)
    }

    pub async fn smoke(&self) -> SmokeReport {
        SmokeTest::new(self.infra.clone(), self.config.clone())
            .run(&self.env)
            .await
    }

    pub fn setup(&self) -> SetupGuide<I> {
        SetupGuide::new(self.infra.clone(), self.config.clone())
    }
}
