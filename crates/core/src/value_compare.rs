//! Comparators: the enumerated condition operator (§4.3), input-equivalence
//! (§4.4.a) and the "consistent change direction" comparator (§4.4.d).
//!
//! `translate_op` is deliberately a closed `match` over an enum rather than
//! dynamic dispatch: the operator set is small and fixed (§9 "Dynamic
//! comparator dispatch").

use crate::value::{DeltaSide, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    In,
    NotIn,
}

impl Op {
    #[must_use]
    pub fn translate(op: &str) -> Option<Self> {
        match op {
            "==" => Some(Self::Eq),
            "!=" => Some(Self::Ne),
            "<" => Some(Self::Lt),
            "<=" => Some(Self::Le),
            ">" => Some(Self::Gt),
            ">=" => Some(Self::Ge),
            "in" => Some(Self::In),
            "not in" => Some(Self::NotIn),
            _ => None,
        }
    }

    /// Applies this operator between a resolved field `value` and a
    /// condition's literal `target`.
    #[must_use]
    pub fn apply(self, value: &Value, target: &Value) -> bool {
        match self {
            Self::Eq => value_equivalent(value, target),
            Self::Ne => !value_equivalent(value, target),
            Self::Lt => ordered_cmp(value, target) == Some(std::cmp::Ordering::Less),
            Self::Le => matches!(
                ordered_cmp(value, target),
                Some(std::cmp::Ordering::Less | std::cmp::Ordering::Equal)
            ),
            Self::Gt => ordered_cmp(value, target) == Some(std::cmp::Ordering::Greater),
            Self::Ge => matches!(
                ordered_cmp(value, target),
                Some(std::cmp::Ordering::Greater | std::cmp::Ordering::Equal)
            ),
            Self::In => target
                .as_array()
                .is_some_and(|items| items.iter().any(|item| value_equivalent(value, item))),
            Self::NotIn => !target
                .as_array()
                .is_some_and(|items| items.iter().any(|item| value_equivalent(value, item))),
        }
    }
}

fn ordered_cmp(left: &Value, right: &Value) -> Option<std::cmp::Ordering> {
    if let (Some(a), Some(b)) = (left.as_f64(), right.as_f64()) {
        return Some(a.total_cmp(&b));
    }
    if let (Some(a), Some(b)) = (left.as_str(), right.as_str()) {
        return Some(a.cmp(b));
    }
    None
}

/// Structural equivalence used throughout the oracle: numeric equality
/// across `Int`/`Float` encodings, whitespace-trimmed string equality, and
/// order-insensitive (multiset) equality for arrays. This is the "typed
/// coercion" the spec's open question (§9) asks implementations to
/// document.
#[must_use]
pub fn value_equivalent(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            left.as_f64() == right.as_f64()
        }
        (Value::String(a), Value::String(b)) => a.trim() == b.trim(),
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Null, Value::Null) => true,
        (Value::Array(a), Value::Array(b)) => arrays_set_equivalent(a, b),
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, value)| b.get(key).is_some_and(|other| value_equivalent(value, other)))
        }
        // one retry rule shared with condition evaluation (§4.3): a bool
        // field compared against the literal strings "true"/"false".
        (Value::Bool(b), Value::String(s)) | (Value::String(s), Value::Bool(b)) => {
            matches!((b, s.as_str()), (true, "true") | (false, "false"))
        }
        _ => false,
    }
}

fn arrays_set_equivalent(left: &[Value], right: &[Value]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    let mut used = vec![false; right.len()];
    'outer: for item in left {
        for (i, candidate) in right.iter().enumerate() {
            if !used[i] && value_equivalent(item, candidate) {
                used[i] = true;
                continue 'outer;
            }
        }
        return false;
    }
    true
}

fn delta_side_equivalent(left: &DeltaSide, right: &DeltaSide) -> bool {
    match (left, right) {
        (DeltaSide::NotPresent, DeltaSide::NotPresent) => true,
        (DeltaSide::Present(a), DeltaSide::Present(b)) => value_equivalent(a, b),
        _ => false,
    }
}

/// §4.4.a: is this input delta a structural no-op that should never be
/// compared against system state at all?
#[must_use]
pub fn input_equivalent(prev: &DeltaSide, curr: &DeltaSide) -> bool {
    delta_side_equivalent(prev, curr)
}

/// §4.4.d: "the system field changed in a manner consistent with the input
/// change." Tries, in order: exact propagation (both sides equivalent),
/// same-direction numeric transition, and matching presence transitions
/// (both insertions or both removals of an equivalent value).
#[must_use]
pub fn compare(
    input_prev: &DeltaSide,
    input_curr: &DeltaSide,
    state_prev: &DeltaSide,
    state_curr: &DeltaSide,
) -> bool {
    if delta_side_equivalent(input_prev, state_prev) && delta_side_equivalent(input_curr, state_curr) {
        return true;
    }

    if let (Some(ip), Some(ic), Some(sp), Some(sc)) = (
        input_prev.as_value().and_then(Value::as_f64),
        input_curr.as_value().and_then(Value::as_f64),
        state_prev.as_value().and_then(Value::as_f64),
        state_curr.as_value().and_then(Value::as_f64),
    ) {
        let input_direction = (ic - ip).signum();
        let state_direction = (sc - sp).signum();
        if input_direction != 0.0 && input_direction == state_direction {
            return true;
        }
    }

    let input_added = input_prev.is_not_present() && !input_curr.is_not_present();
    let state_added = state_prev.is_not_present() && !state_curr.is_not_present();
    if input_added && state_added {
        return delta_side_equivalent(input_curr, state_curr);
    }

    let input_removed = !input_prev.is_not_present() && input_curr.is_not_present();
    let state_removed = !state_prev.is_not_present() && state_curr.is_not_present();
    if input_removed && state_removed {
        return delta_side_equivalent(input_prev, state_prev);
    }

    false
}
