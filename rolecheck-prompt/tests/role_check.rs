use rolecheck_core::{Document, Role};
use rolecheck_prompt::{status_field, RoleCheckPrompt};

#[test]
fn status_field_is_slugged_from_role() {
    assert_eq!(status_field("baker"), "baker_status");
    assert_eq!(status_field(" Pastry Chef "), "pastry_chef_status");
}

#[test]
fn builds_system_then_document_message() {
    let builder = RoleCheckPrompt::new("baker").expect("builder");
    let prompt = builder.build(&Document::new("a.txt", "Bakes bread at dawn."));

    assert_eq!(prompt.messages.len(), 2);
    assert_eq!(prompt.messages[0].role, Role::System);
    assert!(prompt.messages[0].content.contains("person is a BAKER"));
    assert!(prompt.messages[0]
        .content
        .contains(r#""baker_status": "SUPPORTED" | "NOT_FOUND" | "CONFLICT""#));
    assert!(!prompt.messages[0].content.contains("{{"));
    assert_eq!(prompt.messages[1].role, Role::User);
    assert_eq!(prompt.messages[1].content, "DOCUMENT:\nBakes bread at dawn.");
}

#[test]
fn build_is_deterministic() {
    let builder = RoleCheckPrompt::new("baker").expect("builder");
    let doc = Document::new("b.txt", "Runs the {{role}} ovens overnight.");

    let first = builder.build(&doc);
    let second = builder.build(&doc);
    assert_eq!(first, second);
    assert_eq!(first.messages[1].content, "DOCUMENT:\nRuns the {{role}} ovens overnight.");
}

#[test]
fn empty_document_text_is_allowed() {
    let builder = RoleCheckPrompt::new("baker").expect("builder");
    let prompt = builder.build(&Document::new("empty.txt", ""));
    assert_eq!(prompt.messages[1].content, "DOCUMENT:\n");
}

#[test]
fn rejects_blank_role() {
    assert!(RoleCheckPrompt::new("   ").is_err());
}

#[test]
fn exposes_role_and_status_field() {
    let builder = RoleCheckPrompt::new("chef").expect("builder");
    assert_eq!(builder.role(), "chef");
    assert_eq!(builder.status_field(), "chef_status");
}
