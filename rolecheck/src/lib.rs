//! Classify short documents against a role with one validated LLM call each.
//!
//! ```no_run
//! use rolecheck::{ClassifierConfig, Document, OpenAiClient, RunAggregator};
//!
//! # async fn demo() -> Result<(), rolecheck::RolecheckError> {
//! let client = OpenAiClient::new(std::env::var("OPENAI_API_KEY").unwrap_or_default())?;
//! let aggregator = RunAggregator::new(client, ClassifierConfig::default())?;
//! let report = aggregator
//!     .run(vec![Document::new("mia.txt", "Mia bakes bread every morning.")])
//!     .await;
//! println!("{} ok, {} errors", report.totals.ok_count, report.totals.error_count);
//! # Ok(())
//! # }
//! ```

pub use rolecheck_core::{
    ChatModel, ChatModelExt, Document, LlmRequest, LlmResponse, Message, ResponseFormat,
    RetryPolicy, Retrying, Role, RolecheckError, TokenUsage,
};

pub use rolecheck_prompt::{status_field, Prompt, RoleCheckPrompt, ROLE_STATUSES};

pub use rolecheck_agent::{
    validate_response, CallOutcome, ClassificationRecord, ClassifierConfig, FailureDiagnostic,
    FailureKind, ModelInvoker, ModelResponse, NoopObserver, RecordBuilder, RecordStatus,
    RunAggregator, RunEvent, RunObserver, RunReport, RunTotals, SchemaContract,
    ValidatedFields, ValidationError, DEFAULT_MODEL, DEFAULT_ROLE, ERROR_LABEL,
};

#[cfg(feature = "openai")]
pub use rolecheck_llm::{OpenAiClient, OpenAiCompatibleBuilder, OpenAiCompatibleClient};

pub mod core {
    pub use rolecheck_core::*;
}

pub mod prompt {
    pub use rolecheck_prompt::*;
}

pub mod agent {
    pub use rolecheck_agent::*;
}

#[cfg(feature = "openai")]
pub mod llm {
    pub use rolecheck_llm::*;
}
