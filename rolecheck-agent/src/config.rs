use rolecheck_core::{RetryPolicy, RolecheckError};

use crate::SchemaContract;

pub const DEFAULT_ROLE: &str = "baker";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// One initial call plus at most one retry.
pub const MAX_ATTEMPTS: usize = 2;

/// Settings shared by every document in a run.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassifierConfig {
    pub role: String,
    pub model: String,
    pub temperature: f32,
    pub retry: RetryPolicy,
    pub schema: SchemaContract,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ROLE, DEFAULT_MODEL)
    }
}

impl ClassifierConfig {
    pub fn new(role: impl Into<String>, model: impl Into<String>) -> Self {
        let role = role.into();
        let schema = SchemaContract::role_check(&role);
        Self {
            role,
            model: model.into(),
            temperature: 0.0,
            retry: RetryPolicy::single_retry(),
            schema,
        }
    }

    /// Replaces the contract replies are validated against.
    ///
    /// The prompt still asks for the role-check fields of `role`, so a custom
    /// contract must name fields the model will actually return;
    /// [`ClassifierConfig::schema_matches_prompt`] reports whether it does.
    pub fn with_schema(mut self, schema: SchemaContract) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn validate(&self) -> Result<(), RolecheckError> {
        if self.role.trim().is_empty() {
            return Err(invalid("role must not be empty"));
        }
        if self.model.trim().is_empty() {
            return Err(invalid("model must not be empty"));
        }
        if self.retry.max_attempts == 0 {
            return Err(invalid("retry policy must allow at least one attempt"));
        }
        if self.retry.max_attempts > MAX_ATTEMPTS {
            return Err(invalid(&format!(
                "retry policy allows {} attempts, at most {MAX_ATTEMPTS} are permitted",
                self.retry.max_attempts
            )));
        }
        if self.schema.required_fields().is_empty() {
            return Err(invalid("schema must name at least one required field"));
        }
        let label = self.schema.label_field();
        if !self.schema.required_fields().iter().any(|field| field == label) {
            return Err(invalid(&format!(
                "label field '{label}' is not a required schema field"
            )));
        }
        Ok(())
    }

    /// Whether every required field and the label field appear in the
    /// role-check prompt for `role`.
    pub fn schema_matches_prompt(&self) -> bool {
        let prompted = SchemaContract::role_check(&self.role);
        self.schema
            .required_fields()
            .iter()
            .all(|field| prompted.required_fields().contains(field))
            && self.schema.label_field() == prompted.label_field()
    }
}

fn invalid(message: &str) -> RolecheckError {
    RolecheckError::InvalidConfig(message.to_string())
}
