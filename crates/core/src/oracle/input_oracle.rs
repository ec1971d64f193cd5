//! §4.2: inspects the apply-command's stdout/stderr.

use crate::collaborators::InvalidInputClassifier;
use crate::delta::InputDeltaSet;
use crate::snapshot::CliResult;
use crate::verdict::InputVerdict;

#[derive(Debug, Clone, Copy, Default)]
pub struct InputOracle;

impl InputOracle {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn check(
        &self,
        cli_result: &CliResult,
        input_delta: &InputDeltaSet,
        classifier: &dyn InvalidInputClassifier,
    ) -> InputVerdict {
        if cli_result.stderr.to_lowercase().contains("connection refused") {
            return InputVerdict::ConnectionRefused;
        }

        let (is_invalid, responsible_path) = classifier.classify(&cli_result.stderr, input_delta);
        if is_invalid || !cli_result.stderr.is_empty() {
            return InputVerdict::InvalidInput(responsible_path);
        }

        if cli_result.stdout.to_lowercase().contains("unchanged")
            || cli_result.stderr.to_lowercase().contains("unchanged")
        {
            return InputVerdict::Unchanged;
        }

        InputVerdict::Pass
    }
}
