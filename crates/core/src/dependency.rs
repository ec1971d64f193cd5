use std::collections::BTreeMap;

use crate::schema::SchemaNode;
use crate::value::{Path, PathAtom, Value};

/// One precondition stored against a dependent path: `field op value` must
/// hold against `snapshot.input` for a delta at that path to be considered
/// observable.
///
/// Conditions are immutable by construction (§9 "Condition mutation
/// hazard"): evaluation coerces into local variables rather than mutating
/// the stored record, so a `DependencyIndex` shared across `Checker`s is
/// safe to read concurrently.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub field: Path,
    pub op: String,
    pub value: Value,
}

impl Condition {
    #[must_use]
    pub fn new(field: Path, op: impl Into<String>, value: Value) -> Self {
        Self {
            field,
            op: op.into(),
            value,
        }
    }
}

/// Precomputed table mapping a field path to the preconditions that must
/// hold for a change at that path (or any of its subfields) to be
/// observable downstream. Built once at `Checker` construction and
/// immutable thereafter (§3, §5).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DependencyIndex {
    conditions: BTreeMap<Path, Vec<Condition>>,
}

impl DependencyIndex {
    /// Builds the index by seeding from `context.analysis_result.field_conditions_map`
    /// (already resolved to `Path` keys by the caller) and then walking the
    /// schema tree, encoding "an object with an `enabled` sibling gates its
    /// subfields" for every object schema found (§4.3 "Dependency encoding").
    #[must_use]
    pub fn build(root: &SchemaNode, seed: BTreeMap<Path, Vec<Condition>>) -> Self {
        let span = tracing::info_span!("dependency_index_build", seeded = seed.len());
        let _enter = span.enter();
        let mut index = Self { conditions: seed };
        index.walk(root);
        tracing::info!(entries = index.len(), "dependency index built");
        index
    }

    fn walk(&mut self, node: &SchemaNode) {
        let Some(properties) = node.properties() else {
            return;
        };
        for (key, child) in properties {
            if key == "enabled" {
                let dependee = node.path().pushed(PathAtom::key("enabled"));
                self.encode_dependency(node.path(), &dependee);
            }
            match child {
                SchemaNode::Object { .. } => self.walk(child),
                SchemaNode::Array { .. } => {
                    if let Some(item) = child.item_schema() {
                        self.walk(item);
                    }
                }
                SchemaNode::Scalar { .. } => {}
            }
        }
    }

    /// Encodes "depender on dependee": ensures `depender`'s own path is a
    /// key (possibly with empty conditions), then appends `dependee == true`
    /// to every existing key whose path has `depender` as a prefix — i.e.
    /// the depender itself and all of its already-indexed subfields.
    fn encode_dependency(&mut self, depender: &Path, dependee: &Path) {
        tracing::debug!(depender = %depender, dependee = %dependee, "encoding dependency");
        self.conditions.entry(depender.clone()).or_default();
        let condition = Condition::new(dependee.clone(), "==", Value::String("true".to_string()));
        for (path, conditions) in &mut self.conditions {
            if depender.is_prefix_of(path) {
                conditions.push(condition.clone());
            }
        }
    }

    #[must_use]
    pub fn get(&self, path: &Path) -> Option<&[Condition]> {
        self.conditions.get(path).map(Vec::as_slice)
    }

    /// §4.3 Rule D3: the longest path `Q` in the index that is an
    /// elementwise prefix of `path`, if any.
    #[must_use]
    pub fn nearest_parent(&self, path: &Path) -> Option<&Path> {
        self.conditions
            .keys()
            .filter(|candidate| candidate.is_prefix_of(path) && *candidate != path)
            .max_by_key(|candidate| candidate.atoms().len())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}
