//! A differential oracle core for testing Kubernetes-style cluster-resource
//! controllers: given two consecutive snapshots of desired input, apply
//! output, observed cluster state and controller logs, decides whether the
//! controller's observed behavior is consistent with the mutation it was
//! asked to perform.

pub mod checker;
pub mod collaborators;
pub mod config;
pub mod delta;
pub mod delta_log;
pub mod dependency;
pub mod diff;
pub mod error;
pub mod oracle;
pub mod schema;
pub mod skip;
pub mod snapshot;
pub mod value;
pub mod value_compare;
pub mod verdict;

pub use checker::Checker;
pub use config::CheckerConfig;
pub use error::{CheckerError, CheckerResult};
pub use snapshot::Snapshot;
pub use verdict::RunResult;
