// OpenAI-compatible client (always available)
pub mod openai_compatible;

// Provider-specific clients (feature-gated)
pub mod providers;

pub use rolecheck_core::{ChatModel, LlmRequest, LlmResponse, Message, ResponseFormat, Role, TokenUsage};

pub use openai_compatible::{
    ChatCompletionRequest, ChatCompletionResponse, OpenAiCompatibleBuilder,
    OpenAiCompatibleClient,
};

#[cfg(feature = "openai")]
pub use providers::openai::OpenAiClient;
