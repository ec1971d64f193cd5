use crate::delta::Delta;
use crate::dependency::{Condition, DependencyIndex};
use crate::schema::InputModel;
use crate::value::{Path, PathAtom, Value};
use crate::value_compare::{Op, value_equivalent};

/// One atom of a [`ControlFlowField`] gate: either a literal atom that must
/// match exactly, or the `"INDEX"` wildcard that matches any single-digit
/// array index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateAtom {
    Literal(PathAtom),
    Index,
}

/// A declared control-flow field (§4.3 Rule D4): a path, possibly with
/// `"INDEX"` wildcards, whose mutation is known (from static analysis) not
/// to be expected to surface as a state delta.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlFlowField(pub Vec<GateAtom>);

impl ControlFlowField {
    #[must_use]
    pub fn new(atoms: Vec<GateAtom>) -> Self {
        Self(atoms)
    }

    #[must_use]
    fn matches(&self, path: &Path) -> bool {
        if self.0.len() != path.atoms().len() {
            return false;
        }
        self.0.iter().zip(path.atoms()).all(|(gate, atom)| match gate {
            GateAtom::Literal(expected) => expected == atom,
            GateAtom::Index => matches!(atom, PathAtom::Index(_))
                || matches!(atom, PathAtom::Key(key) if is_single_digit(key)),
        })
    }
}

fn is_single_digit(key: &str) -> bool {
    let mut chars = key.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_digit())
}

/// Decides, for each input delta, whether `StateOracle` should ignore it
/// because it is a legitimate non-observable mutation (§4.3).
pub struct SkipEngine<'a> {
    input_model: &'a dyn InputModel,
    dependency_index: &'a DependencyIndex,
    control_flow_fields: &'a [ControlFlowField],
    enable_analysis: bool,
}

impl<'a> SkipEngine<'a> {
    #[must_use]
    pub fn new(
        input_model: &'a dyn InputModel,
        dependency_index: &'a DependencyIndex,
        control_flow_fields: &'a [ControlFlowField],
        enable_analysis: bool,
    ) -> Self {
        Self {
            input_model,
            dependency_index,
            control_flow_fields,
            enable_analysis,
        }
    }

    #[must_use]
    pub fn should_skip(&self, delta: &Delta, snapshot_input: &Value) -> bool {
        if self.is_default_value_noop(delta) {
            return true;
        }

        if let Some(conditions) = self.dependency_index.get(&delta.path) {
            if Self::any_condition_fails(conditions, snapshot_input) {
                return true;
            }
        } else if let Some(parent) = self.dependency_index.nearest_parent(&delta.path) {
            let conditions = self.dependency_index.get(parent).unwrap_or(&[]);
            if Self::any_condition_fails(conditions, snapshot_input) {
                return true;
            }
        }

        if self.enable_analysis && self.control_flow_gate_matches(&delta.path) {
            return true;
        }

        false
    }

    fn any_condition_fails(conditions: &[Condition], snapshot_input: &Value) -> bool {
        conditions.iter().any(|condition| !evaluate_condition(condition, snapshot_input))
    }

    fn control_flow_gate_matches(&self, path: &Path) -> bool {
        self.control_flow_fields.iter().any(|gate| gate.matches(path))
    }

    /// §4.3 Rule D1: schema lookup failure degrades gracefully (§7) — logs
    /// and treats the delta as not a default no-op rather than skipping it.
    fn is_default_value_noop(&self, delta: &Delta) -> bool {
        let Some(node) = self.input_model.schema_by_path(&delta.path) else {
            tracing::warn!(path = %delta.path, "schema lookup failed while checking default-value skip, proceeding without skipping");
            return false;
        };
        let Some(default) = node.default() else {
            return false;
        };

        let prev_is_default = delta.prev.as_value().is_some_and(|v| value_equivalent(v, default));
        let curr_is_default = delta.curr.as_value().is_some_and(|v| value_equivalent(v, default));

        (prev_is_default && delta.curr.is_not_present()) || (curr_is_default && delta.prev.is_not_present())
    }
}

/// §4.3 "Condition evaluation": descend `input` along `condition.field`
/// (with `"INDEX"` atoms coerced to `0` locally, never mutating the stored
/// condition — §9), then apply `condition.op`.
#[must_use]
pub fn evaluate_condition(condition: &Condition, input: &Value) -> bool {
    let resolved_path = rewrite_index_wildcards(&condition.field);

    let Some(value) = input.descend(&resolved_path) else {
        return Op::translate(&condition.op) == Some(Op::Eq) && matches!(condition.value, Value::Null);
    };

    let Some(op) = Op::translate(&condition.op) else {
        return false;
    };

    if op.apply(value, &condition.value) {
        return true;
    }

    // retry rule: a resolved boolean compared against the literal strings
    // "true"/"false" is coerced and compared again.
    if let (Value::Bool(_), Value::String(text)) = (value, &condition.value) {
        if let Some(coerced) = match text.as_str() {
            "true" => Some(Value::Bool(true)),
            "false" => Some(Value::Bool(false)),
            _ => None,
        } {
            return op.apply(value, &coerced);
        }
    }

    false
}

fn rewrite_index_wildcards(field: &Path) -> Path {
    Path::new(
        field
            .atoms()
            .iter()
            .map(|atom| match atom {
                PathAtom::Key(key) if key == "INDEX" => PathAtom::Index(0),
                other => other.clone(),
            })
            .collect(),
    )
}
