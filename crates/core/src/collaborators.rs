//! External collaborators (§1, §6): interfaces the core consumes but does
//! not implement. The fuzzer, driver, schema/static-analysis producer, and
//! log-line grammar are all out of scope; what's in scope is the narrow
//! trait seam each one is consumed through.
//!
//! This module also ships one reference implementation of each trait
//! (behind the seam, not the real grammar) so `checker-testkit` and
//! `checker-cli` have something concrete to wire up without depending on
//! the out-of-scope log parser or classifier.

use std::collections::BTreeMap;

use regex::RegexSet;

use crate::delta::InputDeltaSet;
use crate::value::{Path, PathAtom, Value};

/// One parsed controller log line.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLogLine {
    pub level: String,
    pub fields: BTreeMap<String, Value>,
}

/// The log line parser (§6): out-of-scope grammar, in-scope seam.
pub trait LogParser {
    fn parse(&self, line: &str) -> Option<ParsedLogLine>;
}

/// §6 `invalid_input_message(text, input_delta) -> (bool, path?)`.
pub trait InvalidInputClassifier {
    fn classify(&self, text: &str, input_delta: &InputDeltaSet) -> (bool, Option<Path>);
}

/// A minimal `LogParser` for controller logs emitted as one JSON object per
/// line (a common `tracing`/`logrus`/`zap` convention): `level` is read from
/// a top-level `level` string field, and every other top-level field is
/// carried through verbatim for `LogOracle` to inspect. Lines that aren't a
/// JSON object, or that have no `level` field, are unparseable.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLogParser;

impl JsonLogParser {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl LogParser for JsonLogParser {
    fn parse(&self, line: &str) -> Option<ParsedLogLine> {
        let value: Value = serde_json::from_str(line).ok()?;
        let Value::Object(mut fields) = value else {
            return None;
        };
        let level = match fields.remove("level") {
            Some(Value::String(level)) => level,
            _ => return None,
        };
        Some(ParsedLogLine { level, fields })
    }
}

/// A keyword-driven `InvalidInputClassifier`: `text` is classified invalid
/// when it matches any of a configured set of regexes (e.g. `invalid`,
/// `must be`, `is immutable`). The responsible path, if any, is the first
/// input-delta path whose last atom's name appears (case-insensitively) as
/// a whole word in `text` — a cheap heuristic standing in for the real
/// classifier's message-to-field attribution, which is out of scope (§1).
#[derive(Debug, Clone)]
pub struct KeywordInvalidInputClassifier {
    markers: RegexSet,
}

impl KeywordInvalidInputClassifier {
    #[must_use]
    pub fn new(markers: RegexSet) -> Self {
        Self { markers }
    }

    /// The default marker set: phrasing Kubernetes API servers and
    /// admission webhooks commonly use to reject a mutation.
    #[must_use]
    pub fn with_default_markers() -> Self {
        Self::new(
            RegexSet::new([
                r"(?i)invalid",
                r"(?i)must be",
                r"(?i)is immutable",
                r"(?i)forbidden",
                r"(?i)not allowed",
            ])
            .expect("default marker patterns are valid regexes"),
        )
    }
}

impl InvalidInputClassifier for KeywordInvalidInputClassifier {
    fn classify(&self, text: &str, input_delta: &InputDeltaSet) -> (bool, Option<Path>) {
        if text.is_empty() || !self.markers.is_match(text) {
            return (false, None);
        }

        let lowered = text.to_lowercase();
        let responsible = input_delta.iter_sorted().find_map(|delta| match delta.path.last() {
            Some(PathAtom::Key(name)) if !name.is_empty() && lowered.contains(&name.to_lowercase()) => {
                Some(delta.path.clone())
            }
            _ => None,
        });

        (true, responsible)
    }
}
