use std::sync::Arc;

use bedrock_config::BedrockConfig;
use bedrock_domain::{
    Classification, CompletionInfra, CompletionOutcome, CompletionParams, Error, ModelId,
    ProviderError, classify, classify_message, sanitize_messages,
};
use serde_json::Value;
use tracing::{info, warn};

/// Sends a conversation to the first candidate model that answers.
///
/// Each candidate is tried exactly once, in priority order, with no backoff
/// between attempts. Exhausting the list is reported as an ordinary
/// [`CompletionOutcome::Failure`].
pub struct FallbackDispatcher<C> {
    infra: Arc<C>,
    config: Arc<BedrockConfig>,
}

impl<C: CompletionInfra> FallbackDispatcher<C> {
    pub fn new(infra: Arc<C>, config: Arc<BedrockConfig>) -> Self {
        Self { infra, config }
    }

    /// The models that will be tried for `preferred`, in order.
    ///
    /// A preferred model outside the configured chain is ignored in favour
    /// of the full chain.
    pub fn candidates(&self, preferred: Option<&ModelId>) -> Vec<ModelId> {
        match preferred {
            Some(model) if self.config.is_candidate(model) => vec![model.clone()],
            Some(model) => {
                warn!(
                    model = %model,
                    "Requested model is not a known candidate, using the default chain"
                );
                self.config.candidate_models.clone()
            }
            None => self.config.candidate_models.clone(),
        }
    }

    pub async fn complete(
        &self,
        messages: Vec<Value>,
        preferred: Option<ModelId>,
        overrides: CompletionParams,
    ) -> CompletionOutcome {
        let messages = sanitize_messages(messages);
        let params = self.config.completion.clone().merge(overrides);
        let candidates = self.candidates(preferred.as_ref());

        let mut last_failure: Option<(ProviderError, Classification)> = None;
        for model in &candidates {
            info!(model = %model, "Attempting completion");
            match self.infra.complete(model, &messages, &params).await {
                Ok(response) => {
                    info!(model = %model, "Completion succeeded");
                    return CompletionOutcome::Success {
                        model: model.clone(),
                        text: response.text,
                        usage: response.usage,
                    };
                }
                Err(error) => {
                    let classification = classify(&error);
                    warn!(model = %model, reason = %classification.label, "Completion failed");
                    last_failure = Some((error, classification));
                }
            }
        }

        match last_failure {
            Some((error, classification)) => CompletionOutcome::Failure {
                error: error.to_string(),
                tried_models: candidates,
                suggestions: classification.suggestions.clone(),
                classification,
            },
            None => {
                let error = Error::NoCandidateModels.to_string();
                CompletionOutcome::Failure {
                    classification: classify_message(&error),
                    error,
                    tried_models: candidates,
                    suggestions: Vec::new(),
                }
            }
        }
    }
}
