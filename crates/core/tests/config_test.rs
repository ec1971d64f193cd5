//! §4.10 `CheckerConfig`.

use checker_core::config::CheckerConfig;
use checker_core::error::CheckerError;

#[test]
fn defaults_match_the_documented_baseline() {
    let config = CheckerConfig::default();
    assert!(!config.enable_analysis);
    assert!(config.enable_health_oracle);
    assert!(config.enable_wildcard_fallback);
    assert!(config.exclude_path_regex.is_empty());
    assert!(config.exclude_error_regex.is_empty());
    assert!(config.generic_fields.is_empty());
    assert_eq!(config.namespace, "");
}

#[test]
fn new_accepts_valid_patterns() {
    let config = CheckerConfig::new(
        true,
        false,
        false,
        &["resource_version".to_string()],
        &["(?i)retry".to_string()],
        &["^name$".to_string()],
        "team-a",
    )
    .expect("valid regex patterns should build a config");

    assert!(config.enable_analysis);
    assert!(!config.enable_health_oracle);
    assert!(!config.enable_wildcard_fallback);
    assert_eq!(config.namespace, "team-a");
    assert!(config.exclude_path_regex.is_match("resource_version"));
    assert!(config.generic_fields.is_match("name"));
}

#[test]
fn an_invalid_exclude_path_pattern_reports_a_config_error() {
    let result = CheckerConfig::new(false, true, true, &["(unterminated".to_string()], &[], &[], "");
    match result {
        Err(CheckerError::InvalidConfigRegex(_)) => {}
        other => panic!("expected InvalidConfigRegex, got {other:?}"),
    }
}

#[test]
fn an_invalid_generic_field_pattern_reports_a_config_error() {
    let result = CheckerConfig::new(false, true, true, &[], &[], &["[".to_string()], "");
    assert!(result.is_err());
}
