//! §6's per-generation delta log: `<trial_dir>/delta-<g>.log`, two labeled,
//! pretty-printed JSON blocks for post-mortem inspection.

use std::fs::File;
use std::io::Write as _;
use std::path::{Path as FsPath, PathBuf};

use serde::Serialize;

use crate::delta::{InputDeltaSet, SystemDeltaSet};
use crate::error::{CheckerError, CheckerResult};

const INDENT: &[u8] = b"      ";

#[derive(Debug, Clone)]
pub struct DeltaLog {
    trial_dir: PathBuf,
}

impl DeltaLog {
    #[must_use]
    pub fn new(trial_dir: impl Into<PathBuf>) -> Self {
        Self { trial_dir: trial_dir.into() }
    }

    /// Fire-and-forget per §5/§7: a write failure is logged and never
    /// changes the verdict, so this never propagates an error to the caller.
    pub fn write(&self, generation: u64, input_delta: &InputDeltaSet, system_delta: &SystemDeltaSet) {
        if let Err(error) = self.write_inner(generation, input_delta, system_delta) {
            tracing::warn!(generation, %error, "failed to persist delta log, continuing");
        }
    }

    fn write_inner(
        &self,
        generation: u64,
        input_delta: &InputDeltaSet,
        system_delta: &SystemDeltaSet,
    ) -> CheckerResult<()> {
        let path = self.trial_dir.join(format!("delta-{generation}.log"));
        let mut file = File::create(&path).map_err(|source| io_error(&path, source))?;

        file.write_all(b"INPUT DELTA\n").map_err(|source| io_error(&path, source))?;
        write_pretty(&mut file, input_delta).map_err(|source| io_error(&path, source))?;
        file.write_all(b"\nSYSTEM DELTA\n").map_err(|source| io_error(&path, source))?;
        write_pretty(&mut file, system_delta).map_err(|source| io_error(&path, source))?;
        file.write_all(b"\n").map_err(|source| io_error(&path, source))?;

        Ok(())
    }
}

fn write_pretty<W: std::io::Write, T: Serialize>(writer: &mut W, value: &T) -> std::io::Result<()> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|error| std::io::Error::new(std::io::ErrorKind::Other, error))
}

fn io_error(path: &FsPath, source: std::io::Error) -> CheckerError {
    CheckerError::DeltaLogWrite {
        path: path.display().to_string(),
        source,
    }
}
