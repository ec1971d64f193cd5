use std::collections::BTreeMap;

use serde::Serialize;

use crate::value::{DeltaSide, Path};

/// The kind of structural change a [`Delta`] represents, mirroring the
/// change-kind buckets a tree-diff groups its output into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChangeKind {
    Added,
    Removed,
    ValuesChanged,
}

impl ChangeKind {
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
            Self::ValuesChanged => "values_changed",
        }
    }
}

/// One scalar change: `(path, prev, curr)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Delta {
    pub path: Path,
    pub prev: DeltaSide,
    pub curr: DeltaSide,
}

impl Delta {
    #[must_use]
    pub fn new(path: Path, prev: DeltaSide, curr: DeltaSide) -> Self {
        Self { path, prev, curr }
    }

    #[must_use]
    pub fn change_kind(&self) -> ChangeKind {
        match (&self.prev, &self.curr) {
            (DeltaSide::NotPresent, _) => ChangeKind::Added,
            (_, DeltaSide::NotPresent) => ChangeKind::Removed,
            _ => ChangeKind::ValuesChanged,
        }
    }
}

/// `change-kind -> path-key -> Delta`, as produced by diffing one document
/// against its predecessor.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InputDeltaSet {
    by_kind: BTreeMap<&'static str, BTreeMap<String, Delta>>,
}

impl InputDeltaSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, delta: Delta) {
        let kind = delta.change_kind().tag();
        self.by_kind
            .entry(kind)
            .or_default()
            .insert(delta.path.to_key(), delta);
    }

    /// All deltas, sorted by path-key, so iteration order is deterministic
    /// regardless of insertion order (§5's determinism requirement).
    #[must_use]
    pub fn iter_sorted(&self) -> impl Iterator<Item = &Delta> {
        let mut all: Vec<&Delta> = self.by_kind.values().flat_map(BTreeMap::values).collect();
        all.sort_by(|a, b| a.path.to_key().cmp(&b.path.to_key()));
        all.into_iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_kind.values().all(BTreeMap::is_empty)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_kind.values().map(BTreeMap::len).sum()
    }
}

/// `resource-kind -> resource-name -> change-kind -> path-key -> Delta`.
///
/// The resource-kind `custom_resource_spec` is reserved: it duplicates the
/// input delta and is excluded from path matching by callers (see
/// [`crate::diff::path_match`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SystemDeltaSet {
    by_resource: BTreeMap<String, BTreeMap<String, InputDeltaSet>>,
}

pub const CUSTOM_RESOURCE_SPEC_KIND: &str = "custom_resource_spec";

impl SystemDeltaSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, resource_kind: impl Into<String>, resource_name: impl Into<String>, delta: Delta) {
        self.by_resource
            .entry(resource_kind.into())
            .or_default()
            .entry(resource_name.into())
            .or_default()
            .insert(delta);
    }

    #[must_use]
    pub fn resource_kinds(&self) -> impl Iterator<Item = &str> {
        self.by_resource.keys().map(String::as_str)
    }

    /// A working copy with `custom_resource_spec` excised, as required before
    /// path matching (§4.1, §4.4 step 3).
    #[must_use]
    pub fn without_custom_resource_spec(&self) -> Self {
        let mut copy = self.clone();
        copy.by_resource.remove(CUSTOM_RESOURCE_SPEC_KIND);
        copy
    }

    /// All deltas across every resource kind/name, sorted by path-key within
    /// each (kind, name) bucket but iterated in deterministic `BTreeMap`
    /// order overall.
    #[must_use]
    pub fn iter_sorted(&self) -> impl Iterator<Item = (&str, &str, &Delta)> {
        self.by_resource.iter().flat_map(|(kind, names)| {
            names.iter().flat_map(move |(name, deltas)| {
                deltas
                    .iter_sorted()
                    .map(move |delta| (kind.as_str(), name.as_str(), delta))
            })
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_resource.values().all(|names| names.values().all(InputDeltaSet::is_empty))
    }
}

/// A matched system delta, carrying the resource it was found on so error
/// messages can name it.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedDelta {
    pub resource_kind: String,
    pub resource_name: String,
    pub delta: Delta,
}
