use std::collections::HashMap;

use rolecheck_core::{Document, Message, RolecheckError, Value};

use crate::SystemPromptTemplate;

/// Allowed values of the `<role>_status` field.
pub const ROLE_STATUSES: [&str; 3] = ["SUPPORTED", "NOT_FOUND", "CONFLICT"];

const SYSTEM_TEMPLATE: &str = r#"You are a strict document-based classifier.
Use ONLY the text provided. Do not assume facts not stated.
Your task: determine whether the person is a {{role_upper}}, based on evidence in the text.

Return JSON ONLY matching the schema:
{
  "name": string,
  "stated_occupation": string,
  "{{status_field}}": {{statuses}},
  "evidence": [string, ...],
  "reason": string
}

Rules:
- SUPPORTED: the document supports that they are a {{role}} (title and/or duties clearly involve the work of a {{role}}).
- CONFLICT: the document states "{{role}}" (or equivalent) BUT the duties contradict (e.g., none of the duties of a {{role}}; different role).
- NOT_FOUND: insufficient evidence they are a {{role}} (even if the work is related).
- evidence must be 1-3 short verbatim snippets from the document that justify the status.
- If name or occupation is not explicitly present, use "" for those fields.
"#;

/// Name of the status field the model fills in for `role`, e.g. `baker_status`.
pub fn status_field(role: &str) -> String {
    let slug: String = role
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("{slug}_status")
}

/// Chat messages sent to the model for one document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prompt {
    pub messages: Vec<Message>,
}

impl Prompt {
    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }
}

/// Builds the classification prompt for a fixed role.
///
/// The system policy is rendered once at construction; `build` only attaches
/// the document text, so the same document always yields the same prompt.
#[derive(Clone, Debug)]
pub struct RoleCheckPrompt {
    role: String,
    status_field: String,
    system: Message,
}

impl RoleCheckPrompt {
    pub fn new(role: &str) -> Result<Self, RolecheckError> {
        let role = role.trim();
        if role.is_empty() {
            return Err(RolecheckError::InvalidConfig(
                "role label must not be empty".to_string(),
            ));
        }

        let status_field = status_field(role);
        let statuses = ROLE_STATUSES
            .iter()
            .map(|s| format!("\"{s}\""))
            .collect::<Vec<_>>()
            .join(" | ");

        let mut vars = HashMap::new();
        vars.insert("role".to_string(), Value::from(role.to_lowercase()));
        vars.insert("role_upper".to_string(), Value::from(role.to_uppercase()));
        vars.insert("status_field".to_string(), Value::from(status_field.clone()));
        vars.insert("statuses".to_string(), Value::from(statuses));

        let system = SystemPromptTemplate::new(SYSTEM_TEMPLATE).format(&vars)?;

        Ok(Self {
            role: role.to_string(),
            status_field,
            system,
        })
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn status_field(&self) -> &str {
        &self.status_field
    }

    pub fn build(&self, document: &Document) -> Prompt {
        Prompt {
            messages: vec![
                self.system.clone(),
                Message::user(format!("DOCUMENT:\n{}", document.content)),
            ],
        }
    }
}
