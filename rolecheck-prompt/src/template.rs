use std::collections::HashMap;

use regex::Regex;
use rolecheck_core::{RolecheckError, Value};

/// A text template with `{{ name }}` placeholders.
///
/// Unknown placeholders render as the empty string. Substituted values are not
/// scanned again, so a value containing `{{x}}` is inserted literally.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(template: String) -> Self {
        Self { template }
    }

    pub fn render(&self, vars: &HashMap<String, Value>) -> Result<String, RolecheckError> {
        let pattern = Regex::new(r"\{\{\s*(\w+)\s*\}\}")
            .map_err(|e| RolecheckError::InvalidConfig(e.to_string()))?;
        let rendered = pattern.replace_all(&self.template, |caps: &regex::Captures<'_>| {
            let key = &caps[1];
            match vars.get(key) {
                Some(value) => value
                    .as_str()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| value.to_string()),
                None => String::new(),
            }
        });
        Ok(rendered.to_string())
    }
}
