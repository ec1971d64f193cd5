use regex::RegexSet;

use crate::error::{CheckerError, CheckerResult};

/// The oracle's configuration surface (§4.10, §6's configuration table).
/// A plain data struct, not environment-sourced — `checker-cli` is
/// responsible for loading one from a file and command-line flags.
#[derive(Debug, Clone)]
pub struct CheckerConfig {
    /// Enables `DependencyIndex` seeding from static analysis and §4.3 Rule
    /// D4 control-flow gating.
    pub enable_analysis: bool,
    /// Gates `HealthOracle`; when `false` its result is always `Pass`
    /// (§4.7's parenthetical).
    pub enable_health_oracle: bool,
    /// Gates the §4.4.e wildcard fallback; `true` matches the original's
    /// unconditional behavior (§9 open question).
    pub enable_wildcard_fallback: bool,
    /// Pruned from system-state diffs: volatile housekeeping fields like
    /// resource versions, timestamps, managed-field metadata.
    pub exclude_path_regex: RegexSet,
    /// Log lines ignored by `LogOracle`.
    pub exclude_error_regex: RegexSet,
    /// Field names too generic to participate in longest-suffix path
    /// matching (e.g. `name`, `key`, `value`, `spec`).
    pub generic_fields: RegexSet,
    /// Carried through structured log events; not used for matching.
    pub namespace: String,
}

impl CheckerConfig {
    /// Builds a config from the raw pattern lists, validating every regex
    /// up front rather than deferring failure to the first diff call.
    pub fn new(
        enable_analysis: bool,
        enable_health_oracle: bool,
        enable_wildcard_fallback: bool,
        exclude_path_patterns: &[String],
        exclude_error_patterns: &[String],
        generic_field_patterns: &[String],
        namespace: impl Into<String>,
    ) -> CheckerResult<Self> {
        Ok(Self {
            enable_analysis,
            enable_health_oracle,
            enable_wildcard_fallback,
            exclude_path_regex: RegexSet::new(exclude_path_patterns).map_err(CheckerError::InvalidConfigRegex)?,
            exclude_error_regex: RegexSet::new(exclude_error_patterns).map_err(CheckerError::InvalidConfigRegex)?,
            generic_fields: RegexSet::new(generic_field_patterns).map_err(CheckerError::InvalidConfigRegex)?,
            namespace: namespace.into(),
        })
    }
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            enable_analysis: false,
            enable_health_oracle: true,
            enable_wildcard_fallback: true,
            exclude_path_regex: RegexSet::empty(),
            exclude_error_regex: RegexSet::empty(),
            generic_fields: RegexSet::empty(),
            namespace: String::new(),
        }
    }
}
