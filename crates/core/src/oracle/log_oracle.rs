//! §4.5: scans the controller's own log lines for admissions of rejecting
//! the mutation as invalid input.

use regex::RegexSet;

use crate::collaborators::{InvalidInputClassifier, LogParser};
use crate::delta::InputDeltaSet;
use crate::value::Value;
use crate::verdict::LogVerdict;

const RELEVANT_LEVELS: [&str; 3] = ["warn", "error", "fatal"];

#[derive(Debug, Clone, Copy, Default)]
pub struct LogOracle;

impl LogOracle {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn check(
        &self,
        operator_log: &[String],
        log_parser: &dyn LogParser,
        input_delta: &InputDeltaSet,
        classifier: &dyn InvalidInputClassifier,
        exclude_error_regex: &RegexSet,
    ) -> LogVerdict {
        for line in operator_log {
            let Some(parsed) = log_parser.parse(line) else {
                continue;
            };
            if !RELEVANT_LEVELS.contains(&parsed.level.to_lowercase().as_str()) {
                continue;
            }

            // §4.5 step 2 scans every string value in the parsed line,
            // which includes the level itself (the original's
            // `list(parsed_log.values())` does not special-case it out).
            let level_value = Value::String(parsed.level.clone());
            for value in std::iter::once(&level_value).chain(parsed.fields.values()) {
                if let Value::String(text) = value {
                    let (is_invalid, responsible_path) = classifier.classify(text, input_delta);
                    if is_invalid {
                        return LogVerdict::InvalidInput(responsible_path);
                    }
                }
            }

            if exclude_error_regex.is_match(&line.to_lowercase()) {
                continue;
            }

            // A matching, non-excluded, non-invalid-input line is
            // intentionally not escalated to an Error verdict (§9).
        }

        LogVerdict::Pass
    }
}
