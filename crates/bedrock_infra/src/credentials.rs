//! AWS credential resolution for Bedrock.
//!
//! Resolution goes through the same default provider chain the Bedrock
//! clients use, so a successful probe means the clients will sign requests
//! with the reported key.

use std::sync::Arc;

use aws_credential_types::Credentials;
use aws_credential_types::provider::ProvideCredentials;
use aws_credential_types::provider::error::CredentialsError;
use aws_sdk_bedrock::error::DisplayErrorContext;
use bedrock_domain::{CredentialInfra, ProviderError, Region, ResolvedCredentials};
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::SdkConfigCache;

pub struct AwsCredentialResolver {
    configs: Arc<SdkConfigCache>,
}

impl AwsCredentialResolver {
    pub fn new(configs: Arc<SdkConfigCache>) -> Self {
        Self { configs }
    }
}

#[async_trait::async_trait]
impl CredentialInfra for AwsCredentialResolver {
    async fn resolve_credentials(
        &self,
        region: &Region,
    ) -> Result<Option<ResolvedCredentials>, ProviderError> {
        let config = self.configs.get(region).await;
        let Some(provider) = config.credentials_provider() else {
            debug!("No credentials provider configured");
            return Ok(None);
        };

        match provider.provide_credentials().await {
            Ok(credentials) => Ok(Some(resolved(&credentials))),
            Err(CredentialsError::CredentialsNotLoaded(_)) => Ok(None),
            Err(error) => Err(ProviderError::transport(
                DisplayErrorContext(&error).to_string(),
            )),
        }
    }
}

fn resolved(credentials: &Credentials) -> ResolvedCredentials {
    ResolvedCredentials {
        access_key_id: credentials.access_key_id().to_string(),
        has_session_token: credentials.session_token().is_some(),
        expiry: credentials.expiry().map(DateTime::<Utc>::from),
    }
}
