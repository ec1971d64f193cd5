use std::collections::BTreeMap;

use serde::Deserialize;

use crate::value::Value;

/// stdout/stderr captured from the apply-command invocation that produced
/// this snapshot.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliResult {
    pub stdout: String,
    pub stderr: String,
}

/// `resource-kind -> resource-name -> full document`.
pub type SystemState = BTreeMap<String, BTreeMap<String, Value>>;

/// The (input, cli-output, cluster-state, controller-log) tuple captured at
/// one generation.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub input: Value,
    pub cli_result: CliResult,
    pub system_state: SystemState,
    pub operator_log: Vec<String>,
}

impl Snapshot {
    #[must_use]
    pub fn new(
        input: Value,
        cli_result: CliResult,
        system_state: SystemState,
        operator_log: Vec<String>,
    ) -> Self {
        Self {
            input,
            cli_result,
            system_state,
            operator_log,
        }
    }

    /// The synthetic predecessor of generation 0: the seed input, with no
    /// cluster state yet observed.
    #[must_use]
    pub fn empty(seed: Value) -> Self {
        Self {
            input: seed,
            cli_result: CliResult::default(),
            system_state: SystemState::new(),
            operator_log: Vec::new(),
        }
    }
}
