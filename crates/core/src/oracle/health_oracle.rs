//! §4.6: flags cluster resources that are expected to converge but have not.

use crate::snapshot::SystemState;
use crate::value::{Path, Value};
use crate::value_compare::value_equivalent;
use crate::verdict::HealthVerdict;

const STATEFUL_SET_KIND: &str = "stateful_set";
const DEPLOYMENT_KIND: &str = "deployment";
const POD_KIND: &str = "pod";

#[derive(Debug, Clone, Copy, Default)]
pub struct HealthOracle;

impl HealthOracle {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn check(&self, system_state: &SystemState) -> HealthVerdict {
        let mut offenders: Vec<(&str, &str)> = Vec::new();

        if let Some(names) = system_state.get(STATEFUL_SET_KIND) {
            for (name, doc) in names {
                if !stateful_set_healthy(doc) {
                    offenders.push((STATEFUL_SET_KIND, name));
                }
            }
        }
        if let Some(names) = system_state.get(DEPLOYMENT_KIND) {
            for (name, doc) in names {
                if !deployment_healthy(doc) {
                    offenders.push((DEPLOYMENT_KIND, name));
                }
            }
        }
        if let Some(names) = system_state.get(POD_KIND) {
            for (name, doc) in names {
                if !pod_healthy(doc) {
                    offenders.push((POD_KIND, name));
                }
            }
        }

        if offenders.is_empty() {
            return HealthVerdict::Pass;
        }

        let summary = offenders
            .iter()
            .map(|(kind, name)| format!("{kind}: {name}"))
            .collect::<Vec<_>>()
            .join(", ");
        HealthVerdict::Error(summary)
    }
}

fn field<'a>(doc: &'a Value, parts: &[&str]) -> Option<&'a Value> {
    doc.descend(&Path::from(parts.to_vec()))
}

fn fields_equal(doc: &Value, a: &[&str], b: &[&str]) -> bool {
    match (field(doc, a), field(doc, b)) {
        (Some(x), Some(y)) => value_equivalent(x, y),
        _ => false,
    }
}

fn stateful_set_healthy(doc: &Value) -> bool {
    fields_equal(doc, &["spec", "replicas"], &["status", "replicas"])
        && fields_equal(doc, &["spec", "replicas"], &["status", "ready_replicas"])
        && fields_equal(doc, &["status", "current_revision"], &["status", "update_revision"])
}

fn deployment_healthy(doc: &Value) -> bool {
    let zero = field(doc, &["spec", "replicas"]).and_then(Value::as_f64) == Some(0.0);
    if zero {
        return true;
    }
    fields_equal(doc, &["spec", "replicas"], &["status", "replicas"])
        && fields_equal(doc, &["spec", "replicas"], &["status", "ready_replicas"])
        && fields_equal(doc, &["spec", "replicas"], &["status", "updated_replicas"])
}

fn pod_healthy(doc: &Value) -> bool {
    matches!(
        field(doc, &["status", "phase"]).and_then(Value::as_str),
        Some("Running" | "Completed" | "Succeeded")
    )
}
