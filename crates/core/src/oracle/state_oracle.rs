//! §4.4: cross-checks every surviving input delta against the observed
//! cluster state.

use regex::RegexSet;

use crate::delta::{InputDeltaSet, SystemDeltaSet};
use crate::diff::longest_suffix_matches;
use crate::skip::SkipEngine;
use crate::value::Value;
use crate::value_compare::{compare, input_equivalent};
use crate::verdict::StateVerdict;

#[derive(Debug, Clone, Copy, Default)]
pub struct StateOracle;

impl StateOracle {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn check(
        &self,
        input_delta: &InputDeltaSet,
        working_system_delta: &SystemDeltaSet,
        snapshot_input: &Value,
        skip_engine: &SkipEngine<'_>,
        generic_fields: &RegexSet,
        enable_wildcard_fallback: bool,
    ) -> StateVerdict {
        for delta in input_delta.iter_sorted() {
            if input_equivalent(&delta.prev, &delta.curr) {
                continue;
            }
            if skip_engine.should_skip(delta, snapshot_input) {
                continue;
            }

            let matches = longest_suffix_matches(&delta.path, working_system_delta, generic_fields);

            if matches.is_empty() {
                if enable_wildcard_fallback {
                    let found = working_system_delta
                        .iter_sorted()
                        .any(|(_, _, s)| compare(&delta.prev, &delta.curr, &s.prev, &s.curr));
                    if found {
                        continue;
                    }
                }
                return StateVerdict::Error {
                    message: format!("no matching field for input delta at {}", delta.path),
                    input_delta: delta.clone(),
                    matched_delta: None,
                };
            }

            for matched in &matches {
                if !compare(&delta.prev, &delta.curr, &matched.delta.prev, &matched.delta.curr) {
                    tracing::error!(
                        path = %delta.path,
                        resource_kind = %matched.resource_kind,
                        resource_name = %matched.resource_name,
                        "matched system delta inconsistent with input delta"
                    );
                    return StateVerdict::Error {
                        message: format!(
                            "matched delta inconsistent: {} on {}/{} did not track input change at {}",
                            matched.delta.path, matched.resource_kind, matched.resource_name, delta.path
                        ),
                        input_delta: delta.clone(),
                        matched_delta: Some(matched.delta.clone()),
                    };
                }
                tracing::info!(
                    path = %delta.path,
                    resource_kind = %matched.resource_kind,
                    resource_name = %matched.resource_name,
                    "input delta matched against system delta"
                );
            }
        }

        StateVerdict::Pass
    }
}
