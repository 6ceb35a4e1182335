use serde::Serialize;
use tracing::{info, warn};

use rolecheck_core::{
    ChatModel, LlmRequest, ResponseFormat, Retrying, TokenUsage,
};
use rolecheck_prompt::Prompt;

use crate::ClassifierConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CallOutcome {
    Succeeded,
    Failed,
}

/// Result of one document's model call, retries included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelResponse {
    pub text: String,
    pub usage: TokenUsage,
    pub outcome: CallOutcome,
    pub attempts: usize,
    pub last_error: Option<String>,
}

impl ModelResponse {
    pub fn succeeded(text: impl Into<String>, usage: TokenUsage, attempts: usize) -> Self {
        Self {
            text: text.into(),
            usage,
            outcome: CallOutcome::Succeeded,
            attempts,
            last_error: None,
        }
    }

    /// A failed call carries no text and no token usage.
    pub fn failed(attempts: usize, error: impl Into<String>) -> Self {
        Self {
            text: String::new(),
            usage: TokenUsage::default(),
            outcome: CallOutcome::Failed,
            attempts,
            last_error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == CallOutcome::Succeeded
    }
}

pub struct ModelInvoker<M> {
    model: Retrying<M>,
    model_name: String,
    temperature: f32,
}

impl<M: ChatModel> ModelInvoker<M> {
    pub fn new(model: M, config: &ClassifierConfig) -> Self {
        Self {
            model: Retrying::new(model, config.retry),
            model_name: config.model.clone(),
            temperature: config.temperature,
        }
    }

    /// Sends the prompt, retrying per policy. Never fails; the outcome is in the tag.
    pub async fn invoke(&self, prompt: Prompt) -> ModelResponse {
        let request = LlmRequest {
            model: self.model_name.clone(),
            messages: prompt.into_messages(),
            temperature: Some(self.temperature),
            response_format: Some(ResponseFormat::JsonObject),
        };

        let outcome = self.model.invoke_tracked(request).await;
        match outcome.result {
            Ok(response) => {
                let usage = response.usage.unwrap_or_default();
                info!(
                    attempts = outcome.attempts,
                    total_tokens = usage.total_tokens,
                    "model call completed"
                );
                ModelResponse::succeeded(response.content, usage, outcome.attempts)
            }
            Err(error) => {
                warn!(attempts = outcome.attempts, error = %error, "model call gave up");
                ModelResponse::failed(outcome.attempts, error.to_string())
            }
        }
    }
}
