use std::sync::Arc;

use bedrock_config::BedrockConfig;
use bedrock_domain::{CompletionInfra, CompletionOutcome, CompletionParams};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::info;

use crate::FallbackDispatcher;

/// A canned conversation exercising one sanitizer path.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DemoCase {
    pub name: &'static str,
    pub messages: Vec<Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DemoResult {
    pub case: DemoCase,
    pub outcome: CompletionOutcome,
}

pub fn demo_cases() -> Vec<DemoCase> {
    vec![
        DemoCase {
            name: "Valid conversation",
            messages: vec![
                json!({"role": "system", "content": "You are a helpful assistant."}),
                json!({"role": "user", "content": "What is the capital of France?"}),
            ],
        },
        DemoCase {
            name: "System message only",
            messages: vec![json!({"role": "system", "content": "You are a helpful assistant."})],
        },
        DemoCase { name: "Empty conversation", messages: Vec::new() },
        DemoCase {
            name: "Malformed messages",
            messages: vec![json!({"role": "user"}), json!({"content": "Hello"})],
        },
    ]
}

/// Runs each demo case through the fallback dispatcher in turn.
pub struct Demo<C> {
    dispatcher: FallbackDispatcher<C>,
}

impl<C: CompletionInfra> Demo<C> {
    pub fn new(infra: Arc<C>, config: Arc<BedrockConfig>) -> Self {
        Self { dispatcher: FallbackDispatcher::new(infra, config) }
    }

    pub async fn run(&self) -> Vec<DemoResult> {
        let mut results = Vec::new();
        for case in demo_cases() {
            info!(case = case.name, "Running demo case");
            let outcome = self
                .dispatcher
                .complete(case.messages.clone(), None, CompletionParams::empty())
                .await;
            results.push(DemoResult { case, outcome });
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use bedrock_domain::{ChatMessage, ProviderError};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_utils::MockInfra;

    const SONNET: &str = "bedrock/anthropic.claude-3-sonnet-20240229-v1:0";

    #[tokio::test]
    async fn test_every_case_reaches_the_model_sanitized() {
        let infra = Arc::new(MockInfra::default().completion(SONNET, Ok("ok")));
        let fixture = Demo::new(infra.clone(), Arc::new(BedrockConfig::defaults().unwrap()));

        let actual = fixture.run().await;

        assert_eq!(actual.len(), 4);
        assert!(actual.iter().all(|result| result.outcome.is_success()));

        let calls = infra.completion_calls.lock().unwrap();
        let sent: Vec<Vec<ChatMessage>> = calls.iter().map(|(_, m, _)| m.clone()).collect();
        let expected = vec![
            vec![
                ChatMessage::system("You are a helpful assistant."),
                ChatMessage::user("What is the capital of France?"),
            ],
            vec![
                ChatMessage::system("You are a helpful assistant."),
                ChatMessage::user("Please provide assistance."),
            ],
            vec![ChatMessage::user("Hello")],
            vec![ChatMessage::user("Please help me."), ChatMessage::user("Hello")],
        ];
        assert_eq!(sent, expected);
    }

    #[tokio::test]
    async fn test_failures_carry_suggestions() {
        let infra = MockInfra::default()
            .completion(SONNET, Err(ProviderError::service("ThrottlingException", "slow down")));
        let config = BedrockConfig::defaults()
            .unwrap()
            .candidate_models(vec![bedrock_domain::ModelId::new(SONNET)]);
        let fixture = Demo::new(Arc::new(infra), Arc::new(config));

        let actual = fixture.run().await;

        assert!(actual.iter().all(|result| !result.outcome.is_success()));
        assert!(!actual[0].outcome.suggestions().is_empty());
    }
}
