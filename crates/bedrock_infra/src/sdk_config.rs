use std::collections::HashMap;

use aws_config::SdkConfig;
use bedrock_domain::Region;
use tokio::sync::Mutex;
use tracing::debug;

/// Loads an AWS SDK config for `region` using the SDK's default credential
/// chain.
///
/// The credential chain looks for credentials in this order:
/// 1. Environment variables (AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY,
///    AWS_SESSION_TOKEN)
/// 2. AWS credentials file (~/.aws/credentials)
/// 3. AWS config file (~/.aws/config)
/// 4. IAM role (for EC2/ECS/Lambda)
/// 5. Container credentials (ECS)
pub async fn load_sdk_config(region: &Region) -> SdkConfig {
    aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(region.to_string()))
        .load()
        .await
}

/// Per-region cache of loaded SDK configs. Loading resolves profile files,
/// so each region is loaded at most once per process.
#[derive(Default)]
pub struct SdkConfigCache {
    configs: Mutex<HashMap<Region, SdkConfig>>,
}

impl SdkConfigCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, region: &Region) -> SdkConfig {
        let mut configs = self.configs.lock().await;
        if let Some(config) = configs.get(region) {
            return config.clone();
        }

        debug!(region = %region, "Loading AWS SDK config");
        let config = load_sdk_config(region).await;
        configs.insert(region.clone(), config.clone());
        config
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn test_load_sdk_config_with_region() {
        let config = load_sdk_config(&Region::from("us-west-2")).await;
        assert_eq!(config.region().unwrap().as_ref(), "us-west-2");
    }

    #[tokio::test]
    async fn test_cache_keeps_regions_apart() {
        let fixture = SdkConfigCache::new();

        let east = fixture.get(&Region::from("us-east-1")).await;
        let west = fixture.get(&Region::from("us-west-2")).await;
        let east_again = fixture.get(&Region::from("us-east-1")).await;

        assert_eq!(east.region().unwrap().as_ref(), "us-east-1");
        assert_eq!(west.region().unwrap().as_ref(), "us-west-2");
        assert_eq!(east_again.region(), east.region());
        assert_eq!(fixture.configs.lock().await.len(), 2);
    }
}
