use rolecheck_core::Document;

#[test]
fn document_roundtrip() {
    let doc = Document::new("alice.txt", "Alice runs the sourdough line at a bakery.");

    let json = serde_json::to_string(&doc).unwrap();
    let parsed: Document = serde_json::from_str(&json).unwrap();
    assert_eq!(doc, parsed);
    assert_eq!(parsed.id, "alice.txt");
}
