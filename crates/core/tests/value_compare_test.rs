//! §4.3 condition operators and §4.4's value/transition comparators.

#[path = "support/fixtures.rs"]
mod fixtures;

use checker_core::value::{DeltaSide, Value};
use checker_core::value_compare::{compare, input_equivalent, value_equivalent, Op};
use fixtures::{boolean, int, string};

#[test]
fn numeric_equivalence_crosses_int_and_float_encodings() {
    assert!(value_equivalent(&Value::Int(3), &Value::Float(3.0)));
    assert!(!value_equivalent(&Value::Int(3), &Value::Float(3.5)));
}

#[test]
fn string_equivalence_trims_whitespace() {
    assert!(value_equivalent(&string("  hello "), &string("hello")));
    assert!(!value_equivalent(&string("hello"), &string("world")));
}

#[test]
fn array_equivalence_is_order_insensitive_multiset_comparison() {
    let a = Value::Array(vec![int(1), int(2), int(2)]);
    let b = Value::Array(vec![int(2), int(1), int(2)]);
    let c = Value::Array(vec![int(1), int(2)]);

    assert!(value_equivalent(&a, &b));
    assert!(!value_equivalent(&a, &c), "differing multiplicities must not be equivalent");
}

#[test]
fn bool_and_literal_true_false_strings_coerce_and_compare() {
    assert!(value_equivalent(&boolean(true), &string("true")));
    assert!(value_equivalent(&string("false"), &boolean(false)));
    assert!(!value_equivalent(&boolean(true), &string("false")));
}

#[test]
fn op_apply_covers_all_eight_comparators() {
    assert!(Op::Eq.apply(&int(3), &int(3)));
    assert!(Op::Ne.apply(&int(3), &int(4)));
    assert!(Op::Lt.apply(&int(3), &int(4)));
    assert!(Op::Le.apply(&int(3), &int(3)));
    assert!(Op::Gt.apply(&int(4), &int(3)));
    assert!(Op::Ge.apply(&int(3), &int(3)));
    assert!(Op::In.apply(&int(2), &Value::Array(vec![int(1), int(2)])));
    assert!(Op::NotIn.apply(&int(9), &Value::Array(vec![int(1), int(2)])));
}

#[test]
fn translate_rejects_unknown_operator_strings() {
    assert_eq!(Op::translate("??"), None);
    assert_eq!(Op::translate("=="), Some(Op::Eq));
    assert_eq!(Op::translate("not in"), Some(Op::NotIn));
}

#[test]
fn input_equivalent_is_true_only_for_structurally_equal_sides() {
    assert!(input_equivalent(&DeltaSide::Present(int(1)), &DeltaSide::Present(int(1))));
    assert!(input_equivalent(&DeltaSide::NotPresent, &DeltaSide::NotPresent));
    assert!(!input_equivalent(&DeltaSide::Present(int(1)), &DeltaSide::NotPresent));
}

#[test]
fn compare_succeeds_when_both_sides_transition_the_same_direction() {
    let input_prev = DeltaSide::Present(int(3));
    let input_curr = DeltaSide::Present(int(5));
    let state_prev = DeltaSide::Present(int(3));
    let state_curr = DeltaSide::Present(int(7));

    assert!(compare(&input_prev, &input_curr, &state_prev, &state_curr));
}

#[test]
fn compare_fails_when_directions_disagree() {
    let input_prev = DeltaSide::Present(int(3));
    let input_curr = DeltaSide::Present(int(5));
    let state_prev = DeltaSide::Present(int(3));
    let state_curr = DeltaSide::Present(int(2));

    assert!(!compare(&input_prev, &input_curr, &state_prev, &state_curr));
}

#[test]
fn compare_succeeds_for_matching_insertion_transitions() {
    let input_prev = DeltaSide::NotPresent;
    let input_curr = DeltaSide::Present(string("cert-data"));
    let state_prev = DeltaSide::NotPresent;
    let state_curr = DeltaSide::Present(string("cert-data"));

    assert!(compare(&input_prev, &input_curr, &state_prev, &state_curr));
}

#[test]
fn compare_succeeds_for_matching_removal_transitions() {
    let input_prev = DeltaSide::Present(string("old"));
    let input_curr = DeltaSide::NotPresent;
    let state_prev = DeltaSide::Present(string("old"));
    let state_curr = DeltaSide::NotPresent;

    assert!(compare(&input_prev, &input_curr, &state_prev, &state_curr));
}

#[test]
fn compare_fails_for_unrelated_non_numeric_transitions() {
    let input_prev = DeltaSide::Present(string("a"));
    let input_curr = DeltaSide::Present(string("b"));
    let state_prev = DeltaSide::Present(string("x"));
    let state_curr = DeltaSide::Present(string("y"));

    assert!(!compare(&input_prev, &input_curr, &state_prev, &state_curr));
}
