//! §7: the `RunResult` business-outcome taxonomy, and §4.7's
//! `VerdictCombiner` precedence over the four oracles' individual results.

use crate::delta::Delta;
use crate::value::Path;

/// Which oracle raised an `Error` verdict, carried through for logging and
/// for the human message attached to [`RunResult::Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OracleTag {
    SystemState,
    SystemHealth,
}

impl OracleTag {
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::SystemState => "SYSTEM_STATE",
            Self::SystemHealth => "SYSTEM_HEALTH",
        }
    }
}

/// Extra context attached to an `Error` verdict. `StateMismatch` is the only
/// variant that carries structured data (§4.4.d: "the two deltas that
/// disagreed"); `HealthOracle` only ever needs a summary string.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorDetail {
    None,
    StateMismatch {
        input_delta: Delta,
        matched_delta: Option<Delta>,
    },
}

/// The outcome of one `Checker::check` call (§7). Never a Rust `Result` —
/// see [`crate::error::CheckerError`] for the separate programmer-error
/// taxonomy.
#[derive(Debug, Clone, PartialEq)]
pub enum RunResult {
    Pass,
    Unchanged,
    ConnectionRefused,
    InvalidInput { responsible_path: Option<Path> },
    Error {
        oracle: OracleTag,
        message: String,
        detail: ErrorDetail,
    },
}

impl RunResult {
    #[must_use]
    pub const fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// InputOracle's own result, before combination (§4.2).
#[derive(Debug, Clone, PartialEq)]
pub enum InputVerdict {
    Pass,
    Unchanged,
    ConnectionRefused,
    InvalidInput(Option<Path>),
}

/// StateOracle's own result, before combination (§4.4).
#[derive(Debug, Clone, PartialEq)]
pub enum StateVerdict {
    Pass,
    Error { message: String, input_delta: Delta, matched_delta: Option<Delta> },
}

/// LogOracle's own result, before combination (§4.5). Never `Error`: a
/// matching log line that isn't classified as invalid input is Pass, by
/// design (§9 open question).
#[derive(Debug, Clone, PartialEq)]
pub enum LogVerdict {
    Pass,
    InvalidInput(Option<Path>),
}

/// HealthOracle's own result, before combination (§4.6).
#[derive(Debug, Clone, PartialEq)]
pub enum HealthVerdict {
    Pass,
    Error(String),
}

/// §4.7's precedence, applied over the four oracle outputs in one place so
/// the ordering lives in exactly one function.
#[must_use]
pub fn combine(input: InputVerdict, state: StateVerdict, log: LogVerdict, health: HealthVerdict) -> RunResult {
    // Tie-break between InputOracle and LogOracle InvalidInput: InputOracle
    // runs first in the pipeline (§2), so its verdict wins when both fire.
    if let InputVerdict::InvalidInput(path) = &input {
        return RunResult::InvalidInput { responsible_path: path.clone() };
    }
    if let LogVerdict::InvalidInput(path) = &log {
        return RunResult::InvalidInput { responsible_path: path.clone() };
    }

    if let InputVerdict::ConnectionRefused = input {
        return RunResult::ConnectionRefused;
    }

    if let InputVerdict::Unchanged = input {
        return RunResult::Unchanged;
    }

    if let HealthVerdict::Error(message) = health {
        return RunResult::Error {
            oracle: OracleTag::SystemHealth,
            message,
            detail: ErrorDetail::None,
        };
    }

    if let StateVerdict::Error { message, input_delta, matched_delta } = state {
        return RunResult::Error {
            oracle: OracleTag::SystemState,
            message,
            detail: ErrorDetail::StateMismatch { input_delta, matched_delta },
        };
    }

    RunResult::Pass
}
