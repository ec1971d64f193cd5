//! Structural diff between two documents (§4.1): order-insensitive for
//! sequences, with repetition reporting, tree-shaped so every delta keeps
//! its full parent path.

use std::collections::BTreeMap;

use regex::RegexSet;

use crate::delta::{Delta, InputDeltaSet, SystemDeltaSet};
use crate::snapshot::SystemState;
use crate::value::{DeltaSide, Path, PathAtom, Value};

#[derive(Debug, Clone, Copy, Default)]
pub struct Differ;

impl Differ {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// `input_delta = diff(prev.input, curr.input)`. No path is excluded:
    /// every input field is a candidate for matching.
    #[must_use]
    pub fn diff_input(&self, prev: &Value, curr: &Value) -> InputDeltaSet {
        let mut out = InputDeltaSet::new();
        diff_node(&Path::root(), Some(prev), Some(curr), None, &mut out);
        out
    }

    /// `system_state_delta`: diffs `prev[kind]` against `curr[kind]` for
    /// every resource kind present in `curr`, treating a missing
    /// predecessor kind as empty (§4.1). `exclude_path_regex` prunes
    /// volatile housekeeping fields (resource versions, timestamps,
    /// managed-field metadata) from both the emitted deltas and further
    /// recursion beneath them.
    #[must_use]
    pub fn diff_system_state(
        &self,
        prev: &SystemState,
        curr: &SystemState,
        exclude_path_regex: &RegexSet,
    ) -> SystemDeltaSet {
        let mut out = SystemDeltaSet::new();
        let empty: BTreeMap<String, Value> = BTreeMap::new();

        for (kind, curr_names) in curr {
            let prev_names = prev.get(kind).unwrap_or(&empty);
            let mut names: Vec<&String> = curr_names.keys().chain(prev_names.keys()).collect();
            names.sort();
            names.dedup();

            for name in names {
                let mut deltas = InputDeltaSet::new();
                diff_node(
                    &Path::root(),
                    prev_names.get(name),
                    curr_names.get(name),
                    Some(exclude_path_regex),
                    &mut deltas,
                );
                for delta in deltas.iter_sorted() {
                    out.insert(kind.clone(), name.clone(), delta.clone());
                }
            }
        }

        out
    }
}

fn diff_node(
    path: &Path,
    prev: Option<&Value>,
    curr: Option<&Value>,
    exclude: Option<&RegexSet>,
    out: &mut InputDeltaSet,
) {
    if let Some(exclude) = exclude {
        if exclude.is_match(&path.to_string()) {
            return;
        }
    }

    match (prev, curr) {
        (None, None) => {}
        (None, Some(c)) => out.insert(Delta::new(path.clone(), DeltaSide::NotPresent, c.clone().into())),
        (Some(p), None) => out.insert(Delta::new(path.clone(), p.clone().into(), DeltaSide::NotPresent)),
        (Some(Value::Object(pa)), Some(Value::Object(pb))) => {
            let mut keys: Vec<&String> = pa.keys().chain(pb.keys()).collect();
            keys.sort();
            keys.dedup();
            for key in keys {
                diff_node(&path.pushed(PathAtom::key(key)), pa.get(key), pb.get(key), exclude, out);
            }
        }
        (Some(Value::Array(pa)), Some(Value::Array(pb))) => diff_array(path, pa, pb, exclude, out),
        (Some(p), Some(c)) => {
            if p != c {
                out.insert(Delta::new(path.clone(), p.clone().into(), c.clone().into()));
            }
        }
    }
}

/// Order-insensitive array diff with repetition reporting: greedily pairs
/// off structurally-equal elements (duplicates included, one-for-one) and
/// reports the leftovers as removed/added at their original index.
fn diff_array(path: &Path, prev: &[Value], curr: &[Value], exclude: Option<&RegexSet>, out: &mut InputDeltaSet) {
    let mut curr_remaining: Vec<(usize, &Value)> = curr.iter().enumerate().collect();
    let mut removed_indices = Vec::new();

    for (index, prev_item) in prev.iter().enumerate() {
        if let Some(position) = curr_remaining.iter().position(|(_, c)| *c == prev_item) {
            curr_remaining.remove(position);
        } else {
            removed_indices.push(index);
        }
    }

    for index in removed_indices {
        diff_node(&path.pushed(PathAtom::index(index)), Some(&prev[index]), None, exclude, out);
    }
    for (index, curr_item) in curr_remaining {
        diff_node(&path.pushed(PathAtom::index(index)), None, Some(curr_item), exclude, out);
    }
}
