use std::collections::HashMap;

use crate::PromptTemplate;
use rolecheck_core::{Message, RolecheckError, Value};

/// A template that renders into one system message.
#[derive(Debug, Clone)]
pub struct SystemPromptTemplate(PromptTemplate);

impl SystemPromptTemplate {
    pub fn new(template: &str) -> Self {
        Self(PromptTemplate::new(template.to_string()))
    }

    pub fn format(&self, vars: &HashMap<String, Value>) -> Result<Message, RolecheckError> {
        Ok(Message::system(self.0.render(vars)?))
    }
}
