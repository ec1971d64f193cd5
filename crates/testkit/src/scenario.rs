//! A YAML scenario format and table-driven runner over [`checker_core::Checker`],
//! so new regression cases can be authored without touching Rust (SPEC_FULL.md §8
//! "[AMBIENT] Test tooling").
//!
//! One scenario is a (prev, curr) snapshot pair plus the `RunResult` a
//! correct `Checker` must produce for them. The schema used by every
//! scenario is the empty object: scenarios exercise the differ, path
//! matching and oracle battery, not the skip engine's schema-dependent
//! rules D1/D3/D4 (those are covered by `checker-core`'s own fixture
//! builders instead, which need a real `SchemaNode` tree).

use std::collections::BTreeMap;
use std::path::PathBuf;

use checker_core::collaborators::{JsonLogParser, KeywordInvalidInputClassifier};
use checker_core::schema::{SchemaNode, StaticInputModel};
use checker_core::snapshot::{CliResult, SystemState};
use checker_core::value::{Path, Value};
use checker_core::verdict::OracleTag;
use checker_core::{Checker, CheckerConfig, RunResult};
use serde::Deserialize;

/// One scenario: a (prev, curr) snapshot pair and the expected verdict.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub prev_input: Value,
    pub curr_input: Value,
    #[serde(default)]
    pub prev_system_state: SystemState,
    #[serde(default)]
    pub curr_system_state: SystemState,
    #[serde(default)]
    pub operator_log: Vec<String>,
    #[serde(default)]
    pub cli_result: CliResult,
    pub expect: ExpectedOutcome,
}

/// A looser, human-authorable mirror of [`RunResult`]: `message` text isn't
/// compared (it's not part of the oracle's contract), and `InvalidInput`'s
/// path is only checked when the scenario actually specifies one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExpectedOutcome {
    Pass,
    Unchanged,
    ConnectionRefused,
    InvalidInput {
        #[serde(default)]
        path: Option<Path>,
    },
    Error {
        oracle: ExpectedOracle,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpectedOracle {
    SystemState,
    SystemHealth,
}

impl ExpectedOracle {
    #[must_use]
    const fn matches(self, tag: OracleTag) -> bool {
        matches!(
            (self, tag),
            (Self::SystemState, OracleTag::SystemState) | (Self::SystemHealth, OracleTag::SystemHealth)
        )
    }
}

/// The outcome of running one scenario, mirroring the teacher's
/// `TestResult::{Passed,Failed}` shape (`checker-testkit` has no offline/
/// online distinction to justify a `Skipped` variant).
#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioOutcome {
    Passed,
    Failed { expected: ExpectedOutcome, actual: RunResult },
}

impl ScenarioOutcome {
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }
}

/// Parses a YAML document of `scenario name -> Scenario` entries.
///
/// # Errors
/// Returns the underlying `serde_yaml` error on malformed YAML or a
/// scenario missing a required field.
pub fn load_scenarios_from_str(yaml: &str) -> Result<BTreeMap<String, Scenario>, serde_yaml::Error> {
    serde_yaml::from_str(yaml)
}

/// Builds a `Checker` against the empty schema and runs one generation,
/// `prev_snapshot` synthesized from the scenario's `prev_*` fields and
/// `snapshot` from its `curr_*` fields. `trial_dir` only matters for the
/// (fire-and-forget) per-generation delta log; pass a scratch directory.
#[must_use]
pub fn run_scenario(scenario: &Scenario, trial_dir: impl Into<PathBuf>) -> RunResult {
    let prev = checker_core::Snapshot::new(
        scenario.prev_input.clone(),
        CliResult::default(),
        scenario.prev_system_state.clone(),
        Vec::new(),
    );
    let curr = checker_core::Snapshot::new(
        scenario.curr_input.clone(),
        scenario.cli_result.clone(),
        scenario.curr_system_state.clone(),
        scenario.operator_log.clone(),
    );

    let schema = StaticInputModel::new(SchemaNode::object(Path::root(), BTreeMap::new()));
    let mut checker = Checker::new(
        Box::new(schema),
        Box::new(JsonLogParser::new()),
        Box::new(KeywordInvalidInputClassifier::with_default_markers()),
        CheckerConfig::default(),
        trial_dir,
        BTreeMap::new(),
        Vec::new(),
    )
    .expect("CheckerConfig::default() and an empty schema are always valid");

    checker.check(&curr, &prev, 0)
}

/// Runs `scenario` and checks its result against `scenario.expect`.
#[must_use]
pub fn check_scenario(scenario: &Scenario, trial_dir: impl Into<PathBuf>) -> ScenarioOutcome {
    let actual = run_scenario(scenario, trial_dir);
    if outcome_matches(&scenario.expect, &actual) {
        ScenarioOutcome::Passed
    } else {
        ScenarioOutcome::Failed {
            expected: scenario.expect.clone(),
            actual,
        }
    }
}

fn outcome_matches(expected: &ExpectedOutcome, actual: &RunResult) -> bool {
    match (expected, actual) {
        (ExpectedOutcome::Pass, RunResult::Pass)
        | (ExpectedOutcome::Unchanged, RunResult::Unchanged)
        | (ExpectedOutcome::ConnectionRefused, RunResult::ConnectionRefused) => true,
        (ExpectedOutcome::InvalidInput { path: expected_path }, RunResult::InvalidInput { responsible_path }) => {
            expected_path.is_none() || expected_path == responsible_path
        }
        (ExpectedOutcome::Error { oracle: expected_oracle }, RunResult::Error { oracle, .. }) => {
            expected_oracle.matches(*oracle)
        }
        _ => false,
    }
}
