use serde::{Deserialize, Serialize};
use serde_json::Value;

use rolecheck_core::{Document, TokenUsage};

use crate::{FailureKind, SchemaContract, ValidatedFields, ValidationError};

/// Label recorded in place of a classification when processing fails.
pub const ERROR_LABEL: &str = "ERROR";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordStatus {
    Ok,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureDiagnostic {
    pub kind: FailureKind,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_fields: Vec<String>,
}

impl From<&ValidationError> for FailureDiagnostic {
    fn from(error: &ValidationError) -> Self {
        Self {
            kind: error.kind(),
            reason: error.to_string(),
            missing_fields: error.missing_fields().to_vec(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRecord {
    pub document_id: String,
    pub status: RecordStatus,
    pub label: String,
    #[serde(default)]
    pub fields: ValidatedFields,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureDiagnostic>,
    pub usage: TokenUsage,
}

impl ClassificationRecord {
    pub fn is_classified(&self) -> bool {
        self.status == RecordStatus::Ok
    }
}

/// Turns validation results into records.
///
/// A label outside the contract's allowed set, or equal to [`ERROR_LABEL`],
/// yields an ERROR record so an OK record never carries the sentinel.
pub struct RecordBuilder {
    schema: SchemaContract,
}

impl RecordBuilder {
    pub fn new(schema: &SchemaContract) -> Self {
        Self {
            schema: schema.clone(),
        }
    }

    pub fn build(
        &self,
        document: &Document,
        validation: Result<ValidatedFields, ValidationError>,
        usage: TokenUsage,
    ) -> ClassificationRecord {
        let fields = match validation {
            Ok(fields) => fields,
            Err(error) => return error_record(document, &error, usage),
        };

        let label_field = self.schema.label_field();
        let label = match fields.get(label_field) {
            Some(Value::String(label)) => label.clone(),
            Some(Value::Null) | None => {
                let error = ValidationError::SchemaViolation {
                    missing_fields: vec![label_field.to_string()],
                };
                return error_record(document, &error, usage);
            }
            Some(other) => other.to_string(),
        };

        if label == ERROR_LABEL || !self.schema.is_allowed_label(&label) {
            let error = ValidationError::UnexpectedLabel {
                field: label_field.to_string(),
                value: label,
            };
            return error_record(document, &error, usage);
        }

        ClassificationRecord {
            document_id: document.id.clone(),
            status: RecordStatus::Ok,
            label,
            fields,
            failure: None,
            usage,
        }
    }
}

fn error_record(
    document: &Document,
    error: &ValidationError,
    usage: TokenUsage,
) -> ClassificationRecord {
    ClassificationRecord {
        document_id: document.id.clone(),
        status: RecordStatus::Error,
        label: ERROR_LABEL.to_string(),
        fields: ValidatedFields::new(),
        failure: Some(FailureDiagnostic::from(error)),
        usage,
    }
}
