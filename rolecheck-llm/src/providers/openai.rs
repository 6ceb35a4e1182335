//! OpenAI chat-completions client

use std::time::Duration;

use rolecheck_core::{ChatModel, LlmRequest, LlmResponse, RolecheckError};

use crate::openai_compatible::OpenAiCompatibleClient;

pub const BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

pub struct OpenAiClient(OpenAiCompatibleClient);

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, RolecheckError> {
        Self::with_base_url(api_key, BASE_URL, Duration::from_secs(60))
    }

    /// Points the client at another OpenAI-compatible host, e.g. a proxy.
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, RolecheckError> {
        let client = OpenAiCompatibleClient::builder()
            .base_url(base_url)?
            .api_key(api_key)
            .default_model(DEFAULT_MODEL)
            .timeout(timeout)
            .provider_id("openai")
            .build()?;
        Ok(Self(client))
    }

    /// Set the model to use
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.0.set_default_model(model);
        self
    }

    pub fn model(&self) -> &str {
        self.0.default_model()
    }
}

#[async_trait::async_trait]
impl ChatModel for OpenAiClient {
    async fn invoke(&self, request: LlmRequest) -> Result<LlmResponse, RolecheckError> {
        self.0.invoke(request).await
    }
}
