use serde_json::json;
use rolecheck_agent::{
    FailureKind, RecordBuilder, RecordStatus, SchemaContract, ValidatedFields, ValidationError,
    ERROR_LABEL,
};
use rolecheck_core::{Document, TokenUsage};

fn fields(value: serde_json::Value) -> ValidatedFields {
    value.as_object().cloned().unwrap()
}

fn builder() -> RecordBuilder {
    RecordBuilder::new(&SchemaContract::new(["label", "confidence"], "label"))
}

#[test]
fn success_copies_label_fields_and_usage() {
    let doc = Document::new("a.txt", "Anna runs the bakery ovens.");
    let usage = TokenUsage::new(90, 10, 100);
    let payload = fields(json!({"label": "baker", "confidence": 0.9}));

    let record = builder().build(&doc, Ok(payload.clone()), usage);

    assert_eq!(record.document_id, "a.txt");
    assert_eq!(record.status, RecordStatus::Ok);
    assert!(record.is_classified());
    assert_eq!(record.label, "baker");
    assert_eq!(record.fields, payload);
    assert_eq!(record.usage, usage);
    assert!(record.failure.is_none());
}

#[test]
fn non_string_label_is_rendered_as_json() {
    let doc = Document::new("b.txt", "text");
    let record = builder().build(
        &doc,
        Ok(fields(json!({"label": true, "confidence": 1}))),
        TokenUsage::default(),
    );
    assert_eq!(record.label, "true");
}

#[test]
fn failure_uses_sentinel_and_keeps_diagnostic() {
    let doc = Document::new("c.txt", "text");
    let usage = TokenUsage::new(50, 20, 70);
    let error = ValidationError::SchemaViolation {
        missing_fields: vec!["confidence".to_string()],
    };

    let record = builder().build(&doc, Err(error), usage);

    assert_eq!(record.status, RecordStatus::Error);
    assert!(!record.is_classified());
    assert_eq!(record.label, ERROR_LABEL);
    assert!(record.fields.is_empty());
    assert_eq!(record.usage, usage);
    let failure = record.failure.expect("diagnostic");
    assert_eq!(failure.kind, FailureKind::SchemaViolation);
    assert_eq!(failure.missing_fields, vec!["confidence"]);
}

#[test]
fn record_serializes_status_and_omits_empty_diagnostic() {
    let doc = Document::new("d.txt", "text");
    let record = builder().build(
        &doc,
        Ok(fields(json!({"label": "baker", "confidence": 0.8}))),
        TokenUsage::new(1, 2, 3),
    );

    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["status"], "OK");
    assert!(value.get("failure").is_none());
    assert_eq!(value["usage"]["total_tokens"], 3);
}

#[test]
fn sentinel_label_from_the_model_becomes_an_error_record() {
    let builder = RecordBuilder::new(&SchemaContract::role_check("baker"));
    let payload = fields(json!({
        "name": "",
        "stated_occupation": "",
        "baker_status": "ERROR",
        "evidence": [],
        "reason": "x"
    }));

    let record = builder.build(
        &Document::new("e.txt", "text"),
        Ok(payload),
        TokenUsage::new(5, 5, 10),
    );

    assert_eq!(record.status, RecordStatus::Error);
    assert!(!record.is_classified());
    assert_eq!(record.label, ERROR_LABEL);
    assert!(record.fields.is_empty());
    assert_eq!(record.usage.total_tokens, 10);
    let failure = record.failure.expect("diagnostic");
    assert_eq!(failure.kind, FailureKind::SchemaViolation);
    assert!(failure.reason.contains("'ERROR'"), "{}", failure.reason);
    assert!(failure.missing_fields.is_empty());
}

#[test]
fn sentinel_label_is_rejected_even_without_a_vocabulary() {
    let record = builder().build(
        &Document::new("f.txt", "text"),
        Ok(fields(json!({"label": "ERROR", "confidence": 0.5}))),
        TokenUsage::default(),
    );
    assert_eq!(record.status, RecordStatus::Error);
    assert_eq!(record.failure.unwrap().kind, FailureKind::SchemaViolation);
}

#[test]
fn label_outside_the_role_vocabulary_is_an_error() {
    let builder = RecordBuilder::new(&SchemaContract::role_check("baker"));
    let payload = fields(json!({
        "name": "Ada",
        "stated_occupation": "baker",
        "baker_status": "PROBABLY",
        "evidence": ["bakes"],
        "reason": "unsure"
    }));

    let record = builder.build(&Document::new("g.txt", "text"), Ok(payload), TokenUsage::default());

    assert_eq!(record.status, RecordStatus::Error);
    let failure = record.failure.expect("diagnostic");
    assert!(failure.reason.contains("baker_status"), "{}", failure.reason);
    assert!(failure.reason.contains("PROBABLY"), "{}", failure.reason);
}

#[test]
fn every_role_status_is_accepted() {
    let builder = RecordBuilder::new(&SchemaContract::role_check("baker"));
    for status in ["SUPPORTED", "NOT_FOUND", "CONFLICT"] {
        let payload = fields(json!({
            "name": "Ada",
            "stated_occupation": "",
            "baker_status": status,
            "evidence": [],
            "reason": "r"
        }));
        let record =
            builder.build(&Document::new("h.txt", "text"), Ok(payload), TokenUsage::default());
        assert_eq!(record.status, RecordStatus::Ok);
        assert_eq!(record.label, status);
    }
}
