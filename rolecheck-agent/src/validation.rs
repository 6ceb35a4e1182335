use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use rolecheck_core::{extract_json_object, RolecheckError};

use crate::{ModelResponse, SchemaContract};

/// The parsed reply object, exactly as the model produced it.
pub type ValidatedFields = Map<String, Value>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureKind {
    ModelCallFailed,
    MalformedOutput,
    SchemaViolation,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::ModelCallFailed => "MODEL_CALL_FAILED",
            FailureKind::MalformedOutput => "MALFORMED_OUTPUT",
            FailureKind::SchemaViolation => "SCHEMA_VIOLATION",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("model call failed: {reason}")]
    ModelCallFailed { reason: String },
    #[error("malformed output: {reason}")]
    MalformedOutput { reason: String },
    #[error("missing required fields: {}", missing_fields.join(", "))]
    SchemaViolation { missing_fields: Vec<String> },
    #[error("field '{field}' holds unexpected label '{value}'")]
    UnexpectedLabel { field: String, value: String },
}

impl ValidationError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ValidationError::ModelCallFailed { .. } => FailureKind::ModelCallFailed,
            ValidationError::MalformedOutput { .. } => FailureKind::MalformedOutput,
            ValidationError::SchemaViolation { .. } | ValidationError::UnexpectedLabel { .. } => {
                FailureKind::SchemaViolation
            }
        }
    }

    pub fn missing_fields(&self) -> &[String] {
        match self {
            ValidationError::SchemaViolation { missing_fields } => missing_fields,
            _ => &[],
        }
    }
}

pub fn validate_response(
    response: &ModelResponse,
    schema: &SchemaContract,
) -> Result<ValidatedFields, ValidationError> {
    if !response.is_success() {
        return Err(ValidationError::ModelCallFailed {
            reason: response
                .last_error
                .clone()
                .unwrap_or_else(|| "model call failed".to_string()),
        });
    }

    let object = extract_json_object(&response.text).map_err(|err| match err {
        RolecheckError::ParseFailed { reason, .. } => ValidationError::MalformedOutput { reason },
        other => ValidationError::MalformedOutput {
            reason: other.to_string(),
        },
    })?;

    let missing_fields = schema.missing_fields(&object);
    if !missing_fields.is_empty() {
        return Err(ValidationError::SchemaViolation { missing_fields });
    }

    Ok(object)
}
