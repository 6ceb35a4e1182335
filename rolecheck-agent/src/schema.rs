use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use rolecheck_prompt::{status_field, ROLE_STATUSES};

/// Field names a successful model reply must carry, which one holds the label,
/// and the label values accepted as a classification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaContract {
    required_fields: Vec<String>,
    label_field: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    allowed_labels: Vec<String>,
}

impl SchemaContract {
    pub fn new<I, S>(required_fields: I, label_field: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required_fields: required_fields.into_iter().map(Into::into).collect(),
            label_field: label_field.into(),
            allowed_labels: Vec::new(),
        }
    }

    /// Restricts accepted labels to `labels`. An empty set accepts any label.
    pub fn with_allowed_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Contract matching the role-check prompt for `role`.
    pub fn role_check(role: &str) -> Self {
        let status = status_field(role);
        Self::new(
            [
                "name".to_string(),
                "stated_occupation".to_string(),
                status.clone(),
                "evidence".to_string(),
                "reason".to_string(),
            ],
            status,
        )
        .with_allowed_labels(ROLE_STATUSES)
    }

    pub fn required_fields(&self) -> &[String] {
        &self.required_fields
    }

    pub fn label_field(&self) -> &str {
        &self.label_field
    }

    pub fn allowed_labels(&self) -> &[String] {
        &self.allowed_labels
    }

    pub fn is_allowed_label(&self, label: &str) -> bool {
        self.allowed_labels.is_empty() || self.allowed_labels.iter().any(|allowed| allowed == label)
    }

    /// Required fields absent from `object` or set to null, in contract order.
    pub fn missing_fields(&self, object: &Map<String, Value>) -> Vec<String> {
        self.required_fields
            .iter()
            .filter(|field| matches!(object.get(field.as_str()), None | Some(Value::Null)))
            .cloned()
            .collect()
    }
}
