use std::path::PathBuf;

use anyhow::Context;
use miette::Report;

use crate::config_file::ConfigFileError;

const SNAPSHOT_READ_CONTEXT: &str = "while reading snapshot file";
const SNAPSHOT_PARSE_CONTEXT: &str = "while parsing snapshot JSON";
const CONFIG_CONTEXT: &str = "while loading checker config";
const CHECKER_BUILD_CONTEXT: &str = "while building the checker";

pub(crate) type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug)]
pub(crate) enum CliError {
    ReadSnapshot { path: PathBuf, source: std::io::Error },
    ParseSnapshot { path: PathBuf, source: serde_json::Error },
    Config(ConfigFileError),
    Checker(checker_core::CheckerError),
}

impl From<ConfigFileError> for CliError {
    fn from(value: ConfigFileError) -> Self {
        Self::Config(value)
    }
}

impl From<checker_core::CheckerError> for CliError {
    fn from(value: checker_core::CheckerError) -> Self {
        Self::Checker(value)
    }
}

pub(crate) fn render_runtime_error(error: CliError) -> String {
    match error {
        CliError::ReadSnapshot { path, source } => {
            let context = format!("{SNAPSHOT_READ_CONTEXT} `{}`", path.display());
            format!("[io] {}", report_with_context(source, context))
        }
        CliError::ParseSnapshot { path, source } => {
            let context = format!("{SNAPSHOT_PARSE_CONTEXT} `{}`", path.display());
            format!("[parse] {}", report_with_context(source, context))
        }
        CliError::Config(source) => {
            format!("[config] {}", report_with_context(source, CONFIG_CONTEXT))
        }
        CliError::Checker(source) => {
            format!("[checker] {}", report_with_context(source, CHECKER_BUILD_CONTEXT))
        }
    }
}

fn report_with_context<E, C>(source: E, context: C) -> Report
where
    E: std::error::Error + Send + Sync + 'static,
    C: Into<String>,
{
    let context = context.into();
    let anyhow_error = std::result::Result::<(), E>::Err(source)
        .context(context)
        .expect_err("context wrapping must produce an error");
    miette::miette!("{anyhow_error:#}")
}
