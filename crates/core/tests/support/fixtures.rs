//! Shared fixture builders for the integration test suite, included
//! per-file via `#[path = "support/fixtures.rs"] mod fixtures;` rather than
//! a crate-level module, matching the teacher's test layout.

#![allow(dead_code)]

use std::collections::BTreeMap;

use checker_core::collaborators::{InvalidInputClassifier, LogParser, ParsedLogLine};
use checker_core::delta::InputDeltaSet;
use checker_core::value::{Path, PathAtom, Value};

pub fn path(parts: &[&str]) -> Path {
    Path::new(parts.iter().map(|p| PathAtom::key(*p)).collect())
}

pub fn index_path(parts: &[&str], index: usize, rest: &[&str]) -> Path {
    let mut atoms: Vec<PathAtom> = parts.iter().map(|p| PathAtom::key(*p)).collect();
    atoms.push(PathAtom::index(index));
    atoms.extend(rest.iter().map(|p| PathAtom::key(*p)));
    Path::new(atoms)
}

pub fn obj(fields: &[(&str, Value)]) -> Value {
    Value::Object(fields.iter().map(|(k, v)| (k.to_string(), v.clone())).collect())
}

pub fn int(value: i64) -> Value {
    Value::Int(value)
}

pub fn string(value: &str) -> Value {
    Value::String(value.to_string())
}

pub fn boolean(value: bool) -> Value {
    Value::Bool(value)
}

/// A fake log parser for tests that don't want to depend on the real
/// log-parsing grammar (out of scope, §1): lines look like
/// `level|key=value|key=value`.
pub struct FakeLogParser;

impl LogParser for FakeLogParser {
    fn parse(&self, line: &str) -> Option<ParsedLogLine> {
        let mut parts = line.split('|');
        let level = parts.next()?.to_string();
        let mut fields = BTreeMap::new();
        for part in parts {
            let (key, value) = part.split_once('=')?;
            fields.insert(key.to_string(), Value::String(value.to_string()));
        }
        Some(ParsedLogLine { level, fields })
    }
}

/// A classifier that reports `text` invalid whenever it contains the
/// literal substring `"INVALID"`, always attributing a caller-supplied
/// path.
pub struct FakeClassifier {
    pub responsible_path: Option<Path>,
}

impl InvalidInputClassifier for FakeClassifier {
    fn classify(&self, text: &str, _input_delta: &InputDeltaSet) -> (bool, Option<Path>) {
        (text.contains("INVALID"), self.responsible_path.clone())
    }
}

/// A classifier that never flags anything invalid, for tests that only
/// care about some other oracle's behavior.
pub struct NeverInvalidClassifier;

impl InvalidInputClassifier for NeverInvalidClassifier {
    fn classify(&self, _text: &str, _input_delta: &InputDeltaSet) -> (bool, Option<Path>) {
        (false, None)
    }
}

/// A log parser under which every line fails to parse, for tests that only
/// care about `LogOracle`'s empty-log behavior.
pub struct UnparseableLogParser;

impl LogParser for UnparseableLogParser {
    fn parse(&self, _line: &str) -> Option<ParsedLogLine> {
        None
    }
}
