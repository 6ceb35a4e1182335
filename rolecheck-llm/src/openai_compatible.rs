//! Generic OpenAI-compatible chat-completions client
//!
//! Works against any provider exposing OpenAI's `/v1/chat/completions` shape.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use rolecheck_core::{
    ChatModel, LlmRequest, LlmResponse, Message, ResponseFormat, RolecheckError, TokenUsage,
};

const DEFAULT_API_PATH: &str = "/v1/chat/completions";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Request body for chat completions endpoint
#[derive(Serialize, Debug, Clone)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    pub stream: bool,
}

/// Non-streaming response from chat completions
#[derive(Deserialize, Debug, Clone)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub created: u64,
    #[serde(default)]
    pub model: String,
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,
    pub message: ResponseMessage,
    pub finish_reason: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ResponseMessage {
    #[serde(default)]
    pub role: String,
    pub content: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Copy)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

impl From<Usage> for TokenUsage {
    fn from(usage: Usage) -> Self {
        TokenUsage::new(
            usage.prompt_tokens,
            usage.completion_tokens,
            usage.total_tokens,
        )
    }
}

/// OpenAI-style error response
#[derive(Deserialize, Debug, Clone)]
pub struct OpenAiError {
    pub error: ErrorDetail,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    pub code: Option<String>,
}

pub struct OpenAiCompatibleClient {
    http: Client,
    endpoint: Url,
    api_key: Option<SecretString>,
    default_model: String,
    timeout: Duration,
    provider_id: String,
}

impl OpenAiCompatibleClient {
    pub fn builder() -> OpenAiCompatibleBuilder {
        OpenAiCompatibleBuilder::default()
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    pub fn set_default_model(&mut self, model: impl Into<String>) {
        self.default_model = model.into();
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn provider_id(&self) -> &str {
        &self.provider_id
    }

    fn to_wire(&self, request: LlmRequest) -> ChatCompletionRequest {
        let LlmRequest {
            model,
            messages,
            temperature,
            response_format,
        } = request;
        let model = if model.is_empty() {
            self.default_model.clone()
        } else {
            model
        };
        ChatCompletionRequest {
            model,
            messages,
            temperature,
            response_format,
            max_tokens: None,
            stream: false,
        }
    }

    fn map_transport_error(&self, err: reqwest::Error) -> RolecheckError {
        if err.is_timeout() {
            RolecheckError::Timeout(self.timeout)
        } else {
            RolecheckError::LlmProvider(format!("{}: {err}", self.provider_id))
        }
    }

    fn map_status_error(&self, status: StatusCode, body: &str) -> RolecheckError {
        let detail = serde_json::from_str::<OpenAiError>(body)
            .map(|parsed| parsed.error.message)
            .unwrap_or_else(|_| body.trim().to_string());
        RolecheckError::LlmProvider(format!(
            "{} returned {}: {}",
            self.provider_id,
            status.as_u16(),
            detail
        ))
    }
}

#[async_trait::async_trait]
impl ChatModel for OpenAiCompatibleClient {
    async fn invoke(&self, request: LlmRequest) -> Result<LlmResponse, RolecheckError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| RolecheckError::MissingApiKey {
                provider: self.provider_id.clone(),
            })?;

        let body = self.to_wire(request);
        debug!(
            provider = %self.provider_id,
            model = %body.model,
            messages = body.messages.len(),
            "sending chat completion request"
        );

        let response = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|err| self.map_transport_error(err))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| self.map_transport_error(err))?;

        if !status.is_success() {
            return Err(self.map_status_error(status, &text));
        }

        let parsed: ChatCompletionResponse =
            serde_json::from_str(&text).map_err(|err| RolecheckError::ParseFailed {
                output: text.clone(),
                reason: err.to_string(),
            })?;

        let usage = parsed.usage.map(TokenUsage::from);
        let choice = parsed.choices.into_iter().next().ok_or_else(|| {
            RolecheckError::LlmProvider(format!("{}: no choices returned", self.provider_id))
        })?;

        if let Some(usage) = usage {
            info!(
                provider = %self.provider_id,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "chat completion finished"
            );
        }

        Ok(LlmResponse {
            content: choice.message.content.unwrap_or_default(),
            usage,
        })
    }
}

pub struct OpenAiCompatibleBuilder {
    base_url: Option<Url>,
    api_key: Option<SecretString>,
    default_model: Option<String>,
    timeout: Duration,
    provider_id: String,
    api_path: String,
}

impl Default for OpenAiCompatibleBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            default_model: None,
            timeout: DEFAULT_TIMEOUT,
            provider_id: "openai-compatible".to_string(),
            api_path: DEFAULT_API_PATH.to_string(),
        }
    }
}

impl OpenAiCompatibleBuilder {
    pub fn base_url(mut self, url: &str) -> Result<Self, RolecheckError> {
        let parsed = Url::parse(url)
            .map_err(|err| RolecheckError::InvalidConfig(format!("invalid base url '{url}': {err}")))?;
        self.base_url = Some(parsed);
        Ok(self)
    }

    /// Blank keys are treated as absent.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.api_key = if key.trim().is_empty() {
            None
        } else {
            Some(SecretString::new(key))
        };
        self
    }

    pub fn default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = Some(model.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn provider_id(mut self, id: impl Into<String>) -> Self {
        self.provider_id = id.into();
        self
    }

    pub fn api_path(mut self, path: impl Into<String>) -> Self {
        self.api_path = path.into();
        self
    }

    pub fn build(self) -> Result<OpenAiCompatibleClient, RolecheckError> {
        let base_url = self
            .base_url
            .ok_or_else(|| RolecheckError::InvalidConfig("base url is required".to_string()))?;
        let default_model = self
            .default_model
            .filter(|model| !model.trim().is_empty())
            .ok_or_else(|| RolecheckError::InvalidConfig("default model is required".to_string()))?;

        let endpoint = join_endpoint(&base_url, &self.api_path)?;
        let http = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|err| RolecheckError::LlmProvider(err.to_string()))?;

        Ok(OpenAiCompatibleClient {
            http,
            endpoint,
            api_key: self.api_key,
            default_model,
            timeout: self.timeout,
            provider_id: self.provider_id,
        })
    }
}

fn join_endpoint(base: &Url, path: &str) -> Result<Url, RolecheckError> {
    let joined = format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Url::parse(&joined)
        .map_err(|err| RolecheckError::InvalidConfig(format!("invalid endpoint '{joined}': {err}")))
}
