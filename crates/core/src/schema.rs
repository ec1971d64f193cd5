use std::collections::BTreeMap;

use crate::value::{Path, PathAtom, Value};

/// A node of the input schema tree. Object nodes expose their properties
/// (walked by [`crate::dependency::DependencyIndex::build`]); array nodes
/// expose a single item schema shared by every element; scalar nodes carry
/// only a declared default.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    Object {
        path: Path,
        properties: BTreeMap<String, SchemaNode>,
        default: Option<Value>,
    },
    Array {
        path: Path,
        items: Box<SchemaNode>,
        default: Option<Value>,
    },
    Scalar {
        path: Path,
        default: Option<Value>,
    },
}

impl SchemaNode {
    #[must_use]
    pub fn object(path: Path, properties: BTreeMap<String, SchemaNode>) -> Self {
        Self::Object {
            path,
            properties,
            default: None,
        }
    }

    #[must_use]
    pub fn array(path: Path, items: SchemaNode) -> Self {
        Self::Array {
            path,
            items: Box::new(items),
            default: None,
        }
    }

    #[must_use]
    pub fn scalar(path: Path) -> Self {
        Self::Scalar { path, default: None }
    }

    #[must_use]
    pub fn with_default(mut self, default: Value) -> Self {
        self.set_default(Some(default));
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Object { path, .. } | Self::Array { path, .. } | Self::Scalar { path, .. } => {
                path
            }
        }
    }

    #[must_use]
    pub fn default(&self) -> Option<&Value> {
        match self {
            Self::Object { default, .. } | Self::Array { default, .. } | Self::Scalar { default, .. } => {
                default.as_ref()
            }
        }
    }

    pub fn set_default(&mut self, value: Option<Value>) {
        match self {
            Self::Object { default, .. } | Self::Array { default, .. } | Self::Scalar { default, .. } => {
                *default = value;
            }
        }
    }

    #[must_use]
    pub fn properties(&self) -> Option<&BTreeMap<String, SchemaNode>> {
        match self {
            Self::Object { properties, .. } => Some(properties),
            _ => None,
        }
    }

    #[must_use]
    pub fn item_schema(&self) -> Option<&SchemaNode> {
        match self {
            Self::Array { items, .. } => Some(items),
            _ => None,
        }
    }

    /// Walk to the node at `path` relative to `self`, treating an
    /// out-of-schema atom (unknown key, indexing a non-array) as "not
    /// found" rather than an error.
    #[must_use]
    pub fn node_at<'a>(&'a self, path: &[PathAtom]) -> Option<&'a SchemaNode> {
        let Some((head, rest)) = path.split_first() else {
            return Some(self);
        };
        let next = match (self, head) {
            (Self::Object { properties, .. }, PathAtom::Key(key)) => properties.get(key)?,
            (Self::Array { items, .. }, PathAtom::Index(_)) => items.as_ref(),
            _ => return None,
        };
        next.node_at(rest)
    }

    fn node_at_mut<'a>(&'a mut self, path: &[PathAtom]) -> Option<&'a mut SchemaNode> {
        let Some((head, rest)) = path.split_first() else {
            return Some(self);
        };
        let next = match (self, head) {
            (Self::Object { properties, .. }, PathAtom::Key(key)) => properties.get_mut(key)?,
            (Self::Array { items, .. }, PathAtom::Index(_)) => items.as_mut(),
            _ => return None,
        };
        next.node_at_mut(rest)
    }
}

/// External collaborator (§6): the schema loader / static-analysis producer.
/// `checker-core` only reads from this; building one is out of scope.
pub trait InputModel {
    fn root_schema(&self) -> &SchemaNode;

    fn schema_by_path(&self, path: &Path) -> Option<&SchemaNode> {
        self.root_schema().node_at(path.atoms())
    }
}

/// The simplest [`InputModel`]: an owned, static schema tree. Most callers
/// (and all of this crate's tests) use this rather than implementing the
/// trait themselves.
#[derive(Debug, Clone)]
pub struct StaticInputModel {
    root: SchemaNode,
}

impl StaticInputModel {
    #[must_use]
    pub fn new(root: SchemaNode) -> Self {
        Self { root }
    }

    /// Applies `context.analysis_result.default_value_map` (§6): patches
    /// the schema tree's declared defaults from statically-inferred values
    /// before the checker starts consulting it.
    pub fn apply_default_values(&mut self, defaults: &BTreeMap<String, Value>) {
        for (path_json, value) in defaults {
            let Ok(atoms) = serde_json::from_str::<Vec<PathAtom>>(path_json) else {
                tracing::warn!(path = %path_json, "default_value_map entry is not a valid path, skipping");
                continue;
            };
            if let Some(node) = self.root.node_at_mut(&atoms) {
                node.set_default(Some(value.clone()));
            } else {
                tracing::warn!(path = %path_json, "default_value_map entry has no matching schema node");
            }
        }
    }
}

impl InputModel for StaticInputModel {
    fn root_schema(&self) -> &SchemaNode {
        &self.root
    }
}
