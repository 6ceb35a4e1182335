use serde_json::{Map, Value};

use crate::RolecheckError;

/// Removes surrounding whitespace and a single Markdown code fence, if present.
///
/// A `json` language tag on the opening fence is dropped in any letter case.
pub fn strip_code_fence(input: &str) -> &str {
    let cleaned = input.trim();
    let Some(body) = cleaned.strip_prefix("```") else {
        return cleaned;
    };
    let body = match body.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => &body[4..],
        _ => body,
    };
    body.trim_end_matches("```").trim()
}

/// Parses model output as a JSON object.
///
/// Anything that is not valid JSON, or valid JSON that is not an object, is a
/// `ParseFailed` error carrying the offending text.
pub fn extract_json_object(input: &str) -> Result<Map<String, Value>, RolecheckError> {
    let cleaned = strip_code_fence(input);
    if cleaned.is_empty() {
        return Err(RolecheckError::ParseFailed {
            output: input.to_string(),
            reason: "empty output".to_string(),
        });
    }

    match serde_json::from_str::<Value>(cleaned) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(RolecheckError::ParseFailed {
            output: input.to_string(),
            reason: format!("expected a JSON object, found {}", json_kind(&other)),
        }),
        Err(err) => Err(RolecheckError::ParseFailed {
            output: input.to_string(),
            reason: err.to_string(),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
