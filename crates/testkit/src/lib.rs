//! YAML-driven scenario fixtures and a scenario test runner for
//! `checker-core`'s differential oracle, used by the core's own test suite
//! and available to downstream integrators who want to author regression
//! scenarios without writing Rust.

pub mod scenario;

pub use scenario::{
    check_scenario, load_scenarios_from_str, run_scenario, ExpectedOracle, ExpectedOutcome, Scenario,
    ScenarioOutcome,
};

use std::collections::BTreeMap;

use checker_core::value::Value;

/// A single-resource-kind `system_state` fixture: `{kind: {name: doc}}`.
/// Grounded on the teacher's `single_table_fixture` helper — the smallest
/// building block a scenario author reaches for repeatedly.
#[must_use]
pub fn single_resource_fixture(kind: &str, name: &str, doc: Value) -> checker_core::snapshot::SystemState {
    let mut names = BTreeMap::new();
    names.insert(name.to_string(), doc);
    let mut system_state = checker_core::snapshot::SystemState::new();
    system_state.insert(kind.to_string(), names);
    system_state
}
