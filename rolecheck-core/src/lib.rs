mod document;
mod error;
mod llm;
mod output_parsers;
mod retry;
mod value;

pub use document::Document;
pub use error::RolecheckError;
pub use llm::{ChatModel, LlmRequest, LlmResponse, Message, ResponseFormat, Role, TokenUsage};
pub use output_parsers::{extract_json_object, strip_code_fence};
pub use retry::{ChatModelExt, RetryOutcome, RetryPolicy, Retrying};
pub use value::Value;
