use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single atom of a [`Path`]: either an object key or a sequence index.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathAtom {
    Key(String),
    Index(usize),
}

impl PathAtom {
    #[must_use]
    pub fn key(name: impl Into<String>) -> Self {
        Self::Key(name.into())
    }

    #[must_use]
    pub const fn index(value: usize) -> Self {
        Self::Index(value)
    }

    /// Lowercases string atoms; index atoms are left as-is. Indices only
    /// canonicalize equal to other indices with the same literal value.
    #[must_use]
    pub fn canonicalize(&self) -> Self {
        match self {
            Self::Key(name) => Self::Key(name.to_lowercase()),
            Self::Index(i) => Self::Index(*i),
        }
    }
}

impl fmt::Display for PathAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(name) => write!(f, "{name}"),
            Self::Index(i) => write!(f, "{i}"),
        }
    }
}

/// An ordered sequence of [`PathAtom`]s addressing a node in a nested document.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Path(pub Vec<PathAtom>);

impl Path {
    #[must_use]
    pub fn new(atoms: Vec<PathAtom>) -> Self {
        Self(atoms)
    }

    #[must_use]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn atoms(&self) -> &[PathAtom] {
        &self.0
    }

    #[must_use]
    pub fn last(&self) -> Option<&PathAtom> {
        self.0.last()
    }

    #[must_use]
    pub fn pushed(&self, atom: PathAtom) -> Self {
        let mut atoms = self.0.clone();
        atoms.push(atom);
        Self(atoms)
    }

    /// True iff `self` is an elementwise prefix of `other` (including equal).
    #[must_use]
    pub fn is_prefix_of(&self, other: &Path) -> bool {
        self.0.len() <= other.0.len() && self.0.iter().zip(&other.0).all(|(a, b)| a == b)
    }

    /// A stringified form stable enough to key a `BTreeMap`, used wherever
    /// the spec refers to a "stringified path" (`DependencyIndex` keys,
    /// delta-set keys).
    #[must_use]
    pub fn to_key(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_default()
    }

    /// Length of the longest common suffix between `self` and `other`, under
    /// atom canonicalization. `0` when either path is empty or the last
    /// atoms don't canonicalize equal.
    #[must_use]
    pub fn common_suffix_len(&self, other: &Path) -> usize {
        let mut position = 0;
        loop {
            let Some(a) = self.0.len().checked_sub(position + 1).map(|i| &self.0[i]) else {
                break;
            };
            let Some(b) = other.0.len().checked_sub(position + 1).map(|i| &other.0[i]) else {
                break;
            };
            if a.canonicalize() != b.canonicalize() {
                break;
            }
            position += 1;
        }
        position
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/")?;
        for (i, atom) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            write!(f, "{atom}")?;
        }
        Ok(())
    }
}

impl From<Vec<&str>> for Path {
    fn from(parts: Vec<&str>) -> Self {
        Self(parts.into_iter().map(PathAtom::key).collect())
    }
}

/// The document value model. Both the desired-state input (typically
/// authored as YAML) and the observed cluster state (typically JSON) are
/// normalized into this shape before diffing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

impl Value {
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Object(fields) => Some(fields),
            _ => None,
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|fields| fields.get(key))
    }

    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.as_array().and_then(|items| items.get(index))
    }

    /// Descend along `path`, treating a `PathAtom::Index` against an object
    /// as a lookup failure (type mismatch) rather than a panic.
    #[must_use]
    pub fn descend(&self, path: &Path) -> Option<&Value> {
        let mut current = self;
        for atom in path.atoms() {
            current = match atom {
                PathAtom::Key(key) => current.get(key)?,
                PathAtom::Index(index) => current.get_index(*index)?,
            };
        }
        Some(current)
    }
}

/// Float-aware equality: NaN-safe total ordering comparison for floats,
/// structural equality otherwise. Mirrors the distinction between
/// `PartialEq` and a total-order-aware comparator used when diffing values
/// that may carry floating point fields.
#[must_use]
pub fn value_total_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Float(a), Value::Float(b)) => a.total_cmp(b).is_eq(),
        (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => {
            (*a as f64).total_cmp(b).is_eq()
        }
        _ => left == right,
    }
}

/// Distinguishes "present, possibly null" from "absent" on one side of a
/// [`crate::delta::Delta`]. Kept separate from [`Value`] so a present `null`
/// can never be confused with an absent field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeltaSide {
    Present(Value),
    NotPresent,
}

impl DeltaSide {
    #[must_use]
    pub const fn is_not_present(&self) -> bool {
        matches!(self, Self::NotPresent)
    }

    #[must_use]
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Present(value) => Some(value),
            Self::NotPresent => None,
        }
    }
}

impl From<Value> for DeltaSide {
    fn from(value: Value) -> Self {
        Self::Present(value)
    }
}
