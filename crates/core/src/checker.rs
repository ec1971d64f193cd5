//! §4.8: the public façade. Owns everything immutable across a trial and
//! exposes the single entry point, `check`.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::collaborators::{InvalidInputClassifier, LogParser};
use crate::config::CheckerConfig;
use crate::delta_log::DeltaLog;
use crate::dependency::{Condition, DependencyIndex};
use crate::diff::Differ;
use crate::error::CheckerResult;
use crate::oracle::{HealthOracle, InputOracle, LogOracle, StateOracle};
use crate::schema::InputModel;
use crate::skip::{ControlFlowField, SkipEngine};
use crate::snapshot::Snapshot;
use crate::value::Path;
use crate::verdict::{combine, HealthVerdict, RunResult};

/// One trial's worth of immutable context plus the four oracles (§2, §4.8).
pub struct Checker {
    input_model: Box<dyn InputModel>,
    log_parser: Box<dyn LogParser>,
    classifier: Box<dyn InvalidInputClassifier>,
    dependency_index: DependencyIndex,
    control_flow_fields: Vec<ControlFlowField>,
    config: CheckerConfig,
    delta_log: DeltaLog,
    differ: Differ,
    input_oracle: InputOracle,
    state_oracle: StateOracle,
    log_oracle: LogOracle,
    health_oracle: HealthOracle,
}

impl Checker {
    /// Builds a `Checker`, walking the schema exactly once to construct the
    /// `DependencyIndex` (§4.8). `field_conditions_map` is the seed from
    /// `context.analysis_result` (§6); pass an empty map when analysis is
    /// disabled.
    pub fn new(
        input_model: Box<dyn InputModel>,
        log_parser: Box<dyn LogParser>,
        classifier: Box<dyn InvalidInputClassifier>,
        config: CheckerConfig,
        trial_dir: impl Into<PathBuf>,
        field_conditions_map: BTreeMap<Path, Vec<Condition>>,
        control_flow_fields: Vec<ControlFlowField>,
    ) -> CheckerResult<Self> {
        let dependency_index = DependencyIndex::build(input_model.root_schema(), field_conditions_map);

        Ok(Self {
            input_model,
            log_parser,
            classifier,
            dependency_index,
            control_flow_fields,
            config,
            delta_log: DeltaLog::new(trial_dir),
            differ: Differ::new(),
            input_oracle: InputOracle::new(),
            state_oracle: StateOracle::new(),
            log_oracle: LogOracle::new(),
            health_oracle: HealthOracle::new(),
        })
    }

    /// Runs the full pipeline of §2 for one generation and returns the
    /// combined verdict (§4.7).
    pub fn check(&mut self, snapshot: &Snapshot, prev_snapshot: &Snapshot, generation: u64) -> RunResult {
        let span = tracing::info_span!("check", generation);
        let _enter = span.enter();

        if snapshot.system_state.is_empty() {
            tracing::info!("empty system state, treating generation as invalid input");
            return RunResult::InvalidInput { responsible_path: None };
        }

        let input_delta = self.differ.diff_input(&prev_snapshot.input, &snapshot.input);
        let system_delta = self.differ.diff_system_state(
            &prev_snapshot.system_state,
            &snapshot.system_state,
            &self.config.exclude_path_regex,
        );

        self.delta_log.write(generation, &input_delta, &system_delta);

        let input_verdict = self
            .input_oracle
            .check(&snapshot.cli_result, &input_delta, self.classifier.as_ref());

        let working_system_delta = system_delta.without_custom_resource_spec();
        let skip_engine = SkipEngine::new(
            self.input_model.as_ref(),
            &self.dependency_index,
            &self.control_flow_fields,
            self.config.enable_analysis,
        );
        let state_verdict = self.state_oracle.check(
            &input_delta,
            &working_system_delta,
            &snapshot.input,
            &skip_engine,
            &self.config.generic_fields,
            self.config.enable_wildcard_fallback,
        );

        let log_verdict = self.log_oracle.check(
            &snapshot.operator_log,
            self.log_parser.as_ref(),
            &input_delta,
            self.classifier.as_ref(),
            &self.config.exclude_error_regex,
        );

        let health_verdict = if self.config.enable_health_oracle {
            self.health_oracle.check(&snapshot.system_state)
        } else {
            HealthVerdict::Pass
        };

        combine(input_verdict, state_verdict, log_verdict, health_verdict)
    }
}
