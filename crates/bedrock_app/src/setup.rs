use std::path::Path;
use std::sync::Arc;

use bedrock_config::{
    AWS_ACCESS_KEY_ID, AWS_PROFILE, AWS_REGION, AWS_SECRET_ACCESS_KEY, AWS_SESSION_TOKEN,
    AwsEnvironment, BedrockConfig, RegionInfo,
};
use bedrock_domain::{
    CLASSIFICATION_RULES, ClassificationRule, CliConfigStatus, CommandInfra, EnvVarStatus,
    FileInfra, Region,
};
use tracing::{debug, info};

/// IAM actions a principal needs for everything this tool does.
pub const REQUIRED_PERMISSIONS: [&str; 4] = [
    "bedrock:*",
    "bedrock:ListFoundationModels",
    "bedrock:GetFoundationModel",
    "bedrock:InvokeModel",
];

/// Interactive-free setup assistant: reports what is configured and what is
/// missing, and can write an example environment file.
pub struct SetupGuide<I> {
    infra: Arc<I>,
    config: Arc<BedrockConfig>,
}

impl<I: CommandInfra + FileInfra> SetupGuide<I> {
    pub fn new(infra: Arc<I>, config: Arc<BedrockConfig>) -> Self {
        Self { infra, config }
    }

    pub fn environment_status(&self, env: &AwsEnvironment) -> Vec<EnvVarStatus> {
        env.variables()
    }

    /// Runs `aws configure list` to see whether the AWS CLI has a profile.
    /// A missing or hanging CLI is not an error.
    pub async fn aws_cli_status(&self) -> CliConfigStatus {
        match self
            .infra
            .run("aws", &["configure", "list"], self.config.cli_timeout())
            .await
        {
            Ok(output) if output.success => {
                CliConfigStatus::Configured(output.stdout.trim().to_string())
            }
            Ok(output) => {
                debug!(stderr = %output.stderr.trim(), "aws configure list failed");
                CliConfigStatus::NotConfigured
            }
            Err(error) => CliConfigStatus::Unavailable(error.to_string()),
        }
    }

    pub fn region_catalog(&self) -> &[RegionInfo] {
        &self.config.region_catalog
    }

    pub fn error_patterns(&self) -> &'static [ClassificationRule] {
        CLASSIFICATION_RULES
    }

    pub fn required_permissions(&self) -> &'static [&'static str] {
        &REQUIRED_PERMISSIONS
    }

    pub fn env_example(&self, region: &Region) -> String {
        format!(
            "# AWS credentials for Bedrock\n\
             {AWS_ACCESS_KEY_ID}=your_access_key_id\n\
             {AWS_SECRET_ACCESS_KEY}=your_secret_access_key\n\
             {AWS_REGION}={region}\n\
             \n\
             # Optional\n\
             # {AWS_SESSION_TOKEN}=your_session_token\n\
             # {AWS_PROFILE}=default\n"
        )
    }

    pub async fn write_env_example(&self, path: &Path, region: &Region) -> anyhow::Result<()> {
        self.infra.write(path, &self.env_example(region)).await?;
        info!(path = %path.display(), "Wrote example environment file");
        Ok(())
    }
}
