use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::RolecheckError;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Output shape requested from the provider.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    Text,
    JsonObject,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct LlmRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

/// Token consumption reported by the provider for one call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32, total_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct LlmResponse {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
}

/// A chat-completion endpoint. Implementations return the raw reply text.
#[async_trait::async_trait]
pub trait ChatModel: Send + Sync {
    async fn invoke(&self, request: LlmRequest) -> Result<LlmResponse, RolecheckError>;
}

#[async_trait::async_trait]
impl<T> ChatModel for Arc<T>
where
    T: ChatModel + ?Sized,
{
    async fn invoke(&self, request: LlmRequest) -> Result<LlmResponse, RolecheckError> {
        (**self).invoke(request).await
    }
}

#[async_trait::async_trait]
impl<'a, T> ChatModel for &'a T
where
    T: ChatModel + ?Sized,
{
    async fn invoke(&self, request: LlmRequest) -> Result<LlmResponse, RolecheckError> {
        (**self).invoke(request).await
    }
}

#[async_trait::async_trait]
impl<T> ChatModel for Box<T>
where
    T: ChatModel + ?Sized,
{
    async fn invoke(&self, request: LlmRequest) -> Result<LlmResponse, RolecheckError> {
        (**self).invoke(request).await
    }
}
