//! §7.1: a typed error hierarchy for programmer/configuration failures,
//! kept deliberately separate from [`crate::verdict::RunResult`], which is
//! the *business outcome* taxonomy of §7 and is never a Rust error — a
//! controller behaving badly is data, not a failure of this crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckerError {
    #[error("invalid regex pattern in checker config")]
    InvalidConfigRegex(#[source] regex::Error),

    #[error("failed to write delta log at {path}")]
    DeltaLogWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type CheckerResult<T> = std::result::Result<T, CheckerError>;
