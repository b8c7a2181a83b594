use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result};
use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, InferenceConfiguration, Message, SystemContentBlock,
    TokenUsage,
};
use bedrock_domain::{
    ChatMessage, CompletionInfra, CompletionParams, CompletionResponse, ModelId, ProviderError,
    Region, Role, Usage,
};
use tokio::sync::OnceCell;
use tracing::debug;

use crate::SdkConfigCache;
use crate::error::into_provider_error;

/// A conversation converted into Converse API types.
#[derive(Debug, Clone, PartialEq)]
pub struct ConverseRequest {
    pub system: Vec<SystemContentBlock>,
    pub messages: Vec<Message>,
    pub inference_config: Option<InferenceConfiguration>,
}

impl ConverseRequest {
    pub fn new(messages: &[ChatMessage], params: &CompletionParams) -> Result<Self> {
        let system = messages
            .iter()
            .filter(|message| message.has_role(Role::System))
            .map(|message| SystemContentBlock::Text(message.content.clone()))
            .collect();

        let messages = messages
            .iter()
            .filter(|message| !message.has_role(Role::System))
            .map(|message| {
                let role = match message.role {
                    Role::Assistant => ConversationRole::Assistant,
                    _ => ConversationRole::User,
                };
                Message::builder()
                    .role(role)
                    .content(ContentBlock::Text(message.content.clone()))
                    .build()
                    .with_context(|| "Failed to convert message to Bedrock format")
            })
            .collect::<Result<Vec<_>>>()?;

        let inference_config = if params.temperature.is_some()
            || params.top_p.is_some()
            || params.max_tokens.is_some()
            || !params.stop.is_empty()
        {
            Some(
                InferenceConfiguration::builder()
                    .set_temperature(params.temperature)
                    .set_top_p(params.top_p)
                    .set_max_tokens(
                        params
                            .max_tokens
                            .map(i32::try_from)
                            .transpose()
                            .context("max_tokens exceeds the Bedrock limit")?,
                    )
                    .set_stop_sequences((!params.stop.is_empty()).then(|| params.stop.clone()))
                    .build(),
            )
        } else {
            None
        };

        Ok(Self { system, messages, inference_config })
    }
}

/// Non-streaming completions through the Bedrock Converse API.
pub struct BedrockConverse {
    configs: Arc<SdkConfigCache>,
    region: Region,
    use_inference_profile: bool,
    client: OnceCell<Client>,
}

impl BedrockConverse {
    pub fn new(configs: Arc<SdkConfigCache>, region: Region, use_inference_profile: bool) -> Self {
        Self { configs, region, use_inference_profile, client: OnceCell::new() }
    }

    async fn client(&self) -> &Client {
        self.client
            .get_or_init(|| async { Client::new(&self.configs.get(&self.region).await) })
            .await
    }

    /// The id sent to the runtime API: routing prefixes are dropped and,
    /// when enabled, Anthropic models go through a regional inference
    /// profile.
    pub fn model_id(&self, model: &ModelId) -> String {
        if self.use_inference_profile {
            model.inference_profile_id(&self.region)
        } else {
            model.bedrock_id().to_string()
        }
    }
}

#[async_trait::async_trait]
impl CompletionInfra for BedrockConverse {
    async fn complete(
        &self,
        model: &ModelId,
        messages: &[ChatMessage],
        params: &CompletionParams,
    ) -> Result<CompletionResponse, ProviderError> {
        let request = ConverseRequest::new(messages, params)
            .map_err(|error| ProviderError::transport(format!("{error:#}")))?;
        let model_id = self.model_id(model);
        debug!(model = %model_id, region = %self.region, "Calling Bedrock converse");

        let call = self
            .client()
            .await
            .converse()
            .model_id(model_id)
            .set_system((!request.system.is_empty()).then_some(request.system))
            .set_messages(Some(request.messages))
            .set_inference_config(request.inference_config)
            .send();

        let output = with_timeout(params.timeout, call)
            .await?
            .map_err(into_provider_error)?;

        let text = output
            .output()
            .and_then(|output| output.as_message().ok())
            .map(response_text)
            .unwrap_or_default();

        Ok(CompletionResponse { text, usage: output.usage().map(usage) })
    }
}

/// Bounds a single attempt; `None` waits indefinitely.
async fn with_timeout<F: Future>(
    timeout: Option<Duration>,
    future: F,
) -> Result<F::Output, ProviderError> {
    match timeout {
        Some(limit) => tokio::time::timeout(limit, future)
            .await
            .map_err(|_| ProviderError::timeout(limit)),
        None => Ok(future.await),
    }
}

fn response_text(message: &Message) -> String {
    message
        .content()
        .iter()
        .filter_map(|block| block.as_text().ok())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("")
}

fn usage(usage: &TokenUsage) -> Usage {
    let count = |value: i32| u64::try_from(value).unwrap_or_default();
    Usage {
        input_tokens: count(usage.input_tokens()),
        output_tokens: count(usage.output_tokens()),
        total_tokens: count(usage.total_tokens()),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_system_messages_are_split_out() {
        let fixture = vec![
            ChatMessage::system("You are a helpful assistant."),
            ChatMessage::user("Hello"),
            ChatMessage::assistant("Hi there"),
        ];

        let actual = ConverseRequest::new(&fixture, &CompletionParams::empty()).unwrap();

        assert_eq!(
            actual.system,
            vec![SystemContentBlock::Text("You are a helpful assistant.".to_string())]
        );
        let roles: Vec<ConversationRole> =
            actual.messages.iter().map(|m| m.role().clone()).collect();
        assert_eq!(roles, vec![ConversationRole::User, ConversationRole::Assistant]);
        assert_eq!(actual.inference_config, None);
    }

    #[test]
    fn test_inference_config_from_params() {
        let fixture = CompletionParams::empty()
            .temperature(0.1)
            .max_tokens(50u32)
            .stop(vec!["END".to_string()]);

        let actual = ConverseRequest::new(&[ChatMessage::user("Hi")], &fixture)
            .unwrap()
            .inference_config
            .unwrap();

        assert_eq!(actual.temperature(), Some(0.1));
        assert_eq!(actual.max_tokens(), Some(50));
        assert_eq!(actual.stop_sequences(), ["END".to_string()]);
        assert_eq!(actual.top_p(), None);
    }

    #[test]
    fn test_max_tokens_above_i32_is_rejected() {
        let fixture = CompletionParams::empty().max_tokens(3_000_000_000u32);

        let actual = ConverseRequest::new(&[ChatMessage::user("Hi")], &fixture);

        assert!(actual.is_err());
    }

    #[test]
    fn test_max_tokens_at_i32_limit_is_kept() {
        let fixture = CompletionParams::empty().max_tokens(i32::MAX as u32);

        let actual = ConverseRequest::new(&[ChatMessage::user("Hi")], &fixture)
            .unwrap()
            .inference_config
            .unwrap();

        assert_eq!(actual.max_tokens(), Some(i32::MAX));
    }

    #[tokio::test(start_paused = true)]
    async fn test_with_timeout_expires_pending_attempt() {
        let fixture = std::future::pending::<()>();

        let actual = with_timeout(Some(Duration::from_secs(30)), fixture).await;

        assert_eq!(actual, Err(ProviderError::timeout(Duration::from_secs(30))));
        assert_eq!(actual.unwrap_err().to_string(), "Request timed out after 30s");
    }

    #[tokio::test(start_paused = true)]
    async fn test_with_timeout_passes_through_finished_attempt() {
        let actual = with_timeout(Some(Duration::from_secs(30)), async { 42 }).await;
        assert_eq!(actual, Ok(42));
    }

    #[tokio::test]
    async fn test_without_timeout_awaits_attempt() {
        let actual = with_timeout(None, async { "done" }).await;
        assert_eq!(actual, Ok("done"));
    }

    #[test]
    fn test_model_id_drops_route_prefix() {
        let fixture = BedrockConverse::new(
            Arc::new(SdkConfigCache::new()),
            Region::from("us-east-1"),
            false,
        );

        let actual = fixture.model_id(&ModelId::new("bedrock/anthropic.claude-v2:1"));

        assert_eq!(actual, "anthropic.claude-v2:1");
    }

    #[test]
    fn test_model_id_with_inference_profile() {
        let fixture = BedrockConverse::new(
            Arc::new(SdkConfigCache::new()),
            Region::from("eu-central-1"),
            true,
        );

        let actual =
            fixture.model_id(&ModelId::new("bedrock/anthropic.claude-3-haiku-20240307-v1:0"));

        assert_eq!(actual, "eu.anthropic.claude-3-haiku-20240307-v1:0");
    }

    #[test]
    fn test_response_text_joins_text_blocks() {
        let fixture = Message::builder()
            .role(ConversationRole::Assistant)
            .content(ContentBlock::Text("Connection ".to_string()))
            .content(ContentBlock::Text("successful!".to_string()))
            .build()
            .unwrap();

        assert_eq!(response_text(&fixture), "Connection successful!");
    }

    #[test]
    fn test_usage_conversion() {
        let fixture = TokenUsage::builder()
            .input_tokens(12)
            .output_tokens(5)
            .total_tokens(17)
            .build()
            .unwrap();

        let expected = Usage { input_tokens: 12, output_tokens: 5, total_tokens: 17 };
        assert_eq!(usage(&fixture), expected);
    }
}
