//! §4.3 rules D1-D4.

#[path = "support/fixtures.rs"]
mod fixtures;

use std::collections::BTreeMap;

use checker_core::delta::Delta;
use checker_core::dependency::{Condition, DependencyIndex};
use checker_core::schema::{InputModel, SchemaNode, StaticInputModel};
use checker_core::skip::{ControlFlowField, GateAtom, SkipEngine};
use checker_core::value::{DeltaSide, Path, PathAtom, Value};
use fixtures::{boolean, int, obj, path, string};

fn replicas_schema_with_default(default: i64) -> StaticInputModel {
    let spec = SchemaNode::object(
        path(&["spec"]),
        BTreeMap::from([(
            "replicas".to_string(),
            SchemaNode::scalar(path(&["spec", "replicas"])).with_default(int(default)),
        )]),
    );
    StaticInputModel::new(SchemaNode::object(Path::root(), BTreeMap::from([("spec".to_string(), spec)])))
}

#[test]
fn d1_skips_when_the_absent_side_matches_the_prior_value_and_the_present_side_is_the_declared_default() {
    let model = replicas_schema_with_default(1);
    let index = DependencyIndex::build(model.root_schema(), BTreeMap::new());
    let engine = SkipEngine::new(&model, &index, &[], false);

    let delta = Delta::new(path(&["spec", "replicas"]), DeltaSide::Present(int(1)), DeltaSide::NotPresent);
    let input = obj(&[("spec", obj(&[]))]);

    assert!(engine.should_skip(&delta, &input));
}

#[test]
fn d1_does_not_skip_a_real_change_away_from_the_default() {
    let model = replicas_schema_with_default(1);
    let index = DependencyIndex::build(model.root_schema(), BTreeMap::new());
    let engine = SkipEngine::new(&model, &index, &[], false);

    let delta = Delta::new(path(&["spec", "replicas"]), DeltaSide::Present(int(3)), DeltaSide::Present(int(5)));
    let input = obj(&[("spec", obj(&[("replicas", int(5))]))]);

    assert!(!engine.should_skip(&delta, &input));
}

#[test]
fn d2_exact_dependency_skips_when_a_condition_fails() {
    let schema = SchemaNode::object(Path::root(), BTreeMap::new());
    let model = StaticInputModel::new(schema);
    let mut seed = BTreeMap::new();
    seed.insert(
        path(&["spec", "tls", "cert"]),
        vec![Condition::new(path(&["spec", "tls", "enabled"]), "==", string("true"))],
    );
    let index = DependencyIndex::build(model.root_schema(), seed);
    let engine = SkipEngine::new(&model, &index, &[], false);

    let delta = Delta::new(path(&["spec", "tls", "cert"]), DeltaSide::NotPresent, DeltaSide::Present(string("x")));
    let input = obj(&[("spec", obj(&[("tls", obj(&[("enabled", boolean(false))]))]))]);

    assert!(engine.should_skip(&delta, &input));
}

#[test]
fn d2_exact_dependency_does_not_skip_when_every_condition_holds() {
    let schema = SchemaNode::object(Path::root(), BTreeMap::new());
    let model = StaticInputModel::new(schema);
    let mut seed = BTreeMap::new();
    seed.insert(
        path(&["spec", "tls", "cert"]),
        vec![Condition::new(path(&["spec", "tls", "enabled"]), "==", string("true"))],
    );
    let index = DependencyIndex::build(model.root_schema(), seed);
    let engine = SkipEngine::new(&model, &index, &[], false);

    let delta = Delta::new(path(&["spec", "tls", "cert"]), DeltaSide::NotPresent, DeltaSide::Present(string("x")));
    let input = obj(&[("spec", obj(&[("tls", obj(&[("enabled", boolean(true))]))]))]);

    assert!(!engine.should_skip(&delta, &input));
}

#[test]
fn d3_ancestor_dependency_applies_to_paths_with_no_exact_entry() {
    let schema = SchemaNode::object(Path::root(), BTreeMap::new());
    let model = StaticInputModel::new(schema);
    let mut seed = BTreeMap::new();
    seed.insert(
        path(&["spec", "tls"]),
        vec![Condition::new(path(&["spec", "enabled"]), "==", string("true"))],
    );
    let index = DependencyIndex::build(model.root_schema(), seed);
    let engine = SkipEngine::new(&model, &index, &[], false);

    // "spec.tls.cert.fingerprint" has no exact entry, but "spec.tls" does
    // and is its nearest indexed ancestor.
    let delta = Delta::new(
        path(&["spec", "tls", "cert", "fingerprint"]),
        DeltaSide::NotPresent,
        DeltaSide::Present(string("abcd")),
    );
    let input = obj(&[("spec", obj(&[("enabled", boolean(false))]))]);

    assert!(engine.should_skip(&delta, &input));
}

#[test]
fn d4_control_flow_gate_matches_an_index_wildcard() {
    let schema = SchemaNode::object(Path::root(), BTreeMap::new());
    let model = StaticInputModel::new(schema);
    let index = DependencyIndex::build(model.root_schema(), BTreeMap::new());
    let gate = ControlFlowField::new(vec![
        GateAtom::Literal(PathAtom::key("spec")),
        GateAtom::Literal(PathAtom::key("rules")),
        GateAtom::Index,
        GateAtom::Literal(PathAtom::key("mode")),
    ]);
    let engine = SkipEngine::new(&model, &index, std::slice::from_ref(&gate), true);

    let delta = Delta::new(
        path(&["spec", "rules", "0", "mode"]),
        DeltaSide::Present(string("a")),
        DeltaSide::Present(string("b")),
    );
    let input = Value::Null;

    assert!(engine.should_skip(&delta, &input));
}

#[test]
fn d4_control_flow_gate_is_inert_when_analysis_is_disabled() {
    let schema = SchemaNode::object(Path::root(), BTreeMap::new());
    let model = StaticInputModel::new(schema);
    let index = DependencyIndex::build(model.root_schema(), BTreeMap::new());
    let gate = ControlFlowField::new(vec![
        GateAtom::Literal(PathAtom::key("spec")),
        GateAtom::Literal(PathAtom::key("mode")),
    ]);
    let engine = SkipEngine::new(&model, &index, std::slice::from_ref(&gate), false);

    let delta = Delta::new(path(&["spec", "mode"]), DeltaSide::Present(string("a")), DeltaSide::Present(string("b")));
    let input = Value::Null;

    assert!(!engine.should_skip(&delta, &input));
}

#[test]
fn a_schema_lookup_failure_degrades_to_not_skipping() {
    let schema = SchemaNode::object(Path::root(), BTreeMap::new());
    let model = StaticInputModel::new(schema);
    let index = DependencyIndex::build(model.root_schema(), BTreeMap::new());
    let engine = SkipEngine::new(&model, &index, &[], false);

    // "unknown.field" has no schema node at all.
    let delta = Delta::new(path(&["unknown", "field"]), DeltaSide::NotPresent, DeltaSide::Present(int(1)));
    let input = Value::Null;

    assert!(!engine.should_skip(&delta, &input));
}
