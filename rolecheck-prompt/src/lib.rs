mod chat;
mod role_check;
mod template;

pub use chat::SystemPromptTemplate;
pub use role_check::{status_field, Prompt, RoleCheckPrompt, ROLE_STATUSES};
pub use template::PromptTemplate;
