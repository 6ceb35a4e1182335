use std::time::Duration;

use serde_json::json;
use rolecheck_agent::{ClassifierConfig, SchemaContract};
use rolecheck_core::{RetryPolicy, RolecheckError};

#[test]
fn role_check_contract_names_status_field_as_label() {
    let schema = SchemaContract::role_check("Pastry Chef");
    assert_eq!(
        schema.required_fields(),
        ["name", "stated_occupation", "pastry_chef_status", "evidence", "reason"]
    );
    assert_eq!(schema.label_field(), "pastry_chef_status");
}

#[test]
fn missing_fields_reports_absent_and_null_in_contract_order() {
    let schema = SchemaContract::new(["label", "confidence", "rationale"], "label");
    let object = json!({"rationale": null, "label": "baker", "extra": 1});
    let missing = schema.missing_fields(object.as_object().unwrap());
    assert_eq!(missing, vec!["confidence", "rationale"]);
}

#[test]
fn default_config_targets_baker_with_single_retry() {
    let config = ClassifierConfig::default();
    assert_eq!(config.role, "baker");
    assert_eq!(config.model, "gpt-4o-mini");
    assert_eq!(config.temperature, 0.0);
    assert_eq!(config.retry.max_attempts, 2);
    assert_eq!(config.retry.delay, Duration::ZERO);
    assert_eq!(config.schema.label_field(), "baker_status");
    config.validate().expect("default config is valid");
}

#[test]
fn validate_rejects_unusable_configs() {
    let cases = vec![
        ClassifierConfig::new("baker", "  "),
        ClassifierConfig::new("", "gpt-4o-mini"),
        ClassifierConfig::default().with_retry(RetryPolicy::new(0, Duration::ZERO)),
        ClassifierConfig::default().with_schema(SchemaContract::new(Vec::<String>::new(), "label")),
        ClassifierConfig::default().with_schema(SchemaContract::new(["confidence"], "label")),
    ];

    for config in cases {
        let err = config.validate().expect_err("config should be rejected");
        assert!(matches!(err, RolecheckError::InvalidConfig(_)), "{err:?}");
    }
}

#[test]
fn role_check_contract_accepts_only_role_statuses() {
    let schema = SchemaContract::role_check("baker");
    assert_eq!(schema.allowed_labels(), ["SUPPORTED", "NOT_FOUND", "CONFLICT"]);
    assert!(schema.is_allowed_label("CONFLICT"));
    assert!(!schema.is_allowed_label("supported"));

    let open = SchemaContract::new(["label"], "label");
    assert!(open.allowed_labels().is_empty());
    assert!(open.is_allowed_label("chef"));
}

#[test]
fn validate_caps_attempts_at_one_retry() {
    let single = ClassifierConfig::default().with_retry(RetryPolicy::new(1, Duration::ZERO));
    single.validate().expect("no retry is allowed");

    let delayed = ClassifierConfig::default()
        .with_retry(RetryPolicy::single_retry().with_delay(Duration::from_millis(500)));
    delayed.validate().expect("delayed single retry is allowed");

    let greedy = ClassifierConfig::default().with_retry(RetryPolicy::new(5, Duration::ZERO));
    let err = greedy.validate().expect_err("five attempts rejected");
    match err {
        RolecheckError::InvalidConfig(message) => assert!(message.contains("at most 2"), "{message}"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn custom_schema_is_flagged_when_it_drifts_from_the_prompt() {
    assert!(ClassifierConfig::default().schema_matches_prompt());

    let subset = ClassifierConfig::default().with_schema(SchemaContract::new(
        ["baker_status", "reason"],
        "baker_status",
    ));
    assert!(subset.schema_matches_prompt());

    let drifted = ClassifierConfig::default()
        .with_schema(SchemaContract::new(["label", "confidence"], "label"));
    assert!(!drifted.schema_matches_prompt());
    drifted.validate().expect("drift is reported, not rejected");
}
