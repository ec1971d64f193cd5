//! The reference `LogParser`/`InvalidInputClassifier` implementations
//! shipped alongside the out-of-scope collaborator traits (§1, §6).

#[path = "support/fixtures.rs"]
mod fixtures;

use checker_core::collaborators::{InvalidInputClassifier, JsonLogParser, KeywordInvalidInputClassifier, LogParser};
use checker_core::delta::InputDeltaSet;
use fixtures::path;

#[test]
fn json_log_parser_extracts_the_level_and_leaves_the_rest_as_fields() {
    let parser = JsonLogParser::new();
    let line = r#"{"level":"error","msg":"replica set not ready","attempt":3}"#;

    let parsed = parser.parse(line).expect("a well-formed JSON object should parse");
    assert_eq!(parsed.level, "error");
    assert_eq!(parsed.fields.get("msg").and_then(|v| v.as_str()), Some("replica set not ready"));
    assert!(parsed.fields.get("attempt").is_some());
    assert!(!parsed.fields.contains_key("level"));
}

#[test]
fn json_log_parser_rejects_lines_that_are_not_json_objects() {
    let parser = JsonLogParser::new();
    assert!(parser.parse("not json at all").is_none());
    assert!(parser.parse("[1, 2, 3]").is_none());
}

#[test]
fn json_log_parser_rejects_objects_missing_a_string_level() {
    let parser = JsonLogParser::new();
    assert!(parser.parse(r#"{"msg":"no level field here"}"#).is_none());
    assert!(parser.parse(r#"{"level":7,"msg":"level is not a string"}"#).is_none());
}

#[test]
fn keyword_classifier_flags_text_containing_a_default_marker() {
    let classifier = KeywordInvalidInputClassifier::with_default_markers();
    let (is_invalid, _) = classifier.classify("spec.replicas is immutable once set", &InputDeltaSet::new());
    assert!(is_invalid);
}

#[test]
fn keyword_classifier_passes_clean_text_through() {
    let classifier = KeywordInvalidInputClassifier::with_default_markers();
    let (is_invalid, responsible_path) = classifier.classify("reconciled successfully", &InputDeltaSet::new());
    assert!(!is_invalid);
    assert!(responsible_path.is_none());
}

#[test]
fn keyword_classifier_attributes_the_delta_whose_path_is_named_in_the_text() {
    let classifier = KeywordInvalidInputClassifier::with_default_markers();
    let mut deltas = InputDeltaSet::new();
    deltas.insert(checker_core::delta::Delta::new(
        path(&["spec", "replicas"]),
        checker_core::value::DeltaSide::Present(checker_core::value::Value::Int(3)),
        checker_core::value::DeltaSide::Present(checker_core::value::Value::Int(-1)),
    ));

    let (is_invalid, responsible_path) = classifier.classify("field replicas must be >= 0", &deltas);
    assert!(is_invalid);
    assert_eq!(responsible_path, Some(path(&["spec", "replicas"])));
}

#[test]
fn keyword_classifier_never_flags_empty_text() {
    let classifier = KeywordInvalidInputClassifier::with_default_markers();
    let (is_invalid, _) = classifier.classify("", &InputDeltaSet::new());
    assert!(!is_invalid);
}
