//! A minimal binary wiring `checker-core`'s oracle to two snapshot files and
//! a config file on disk (SPEC_FULL.md §2.1): no trial-directory globbing,
//! no archival, no statistics — those are driver/harness concerns out of
//! scope per the core's own §1.

mod config_file;
mod error_presentation;

use std::path::PathBuf;
use std::{fs, process::ExitCode};

use checker_core::collaborators::{JsonLogParser, KeywordInvalidInputClassifier};
use checker_core::schema::{SchemaNode, StaticInputModel};
use checker_core::snapshot::{CliResult as ApplyCliResult, SystemState};
use checker_core::value::{Path, Value};
use checker_core::{Checker, RunResult};
use clap::Parser;
use serde::Deserialize;
use std::collections::BTreeMap;

use config_file::ConfigFile;
use error_presentation::{render_runtime_error, CliError, CliResult};

/// Runs one generation of the differential oracle over two snapshot files.
#[derive(Debug, Parser)]
#[command(name = "checker", version, about)]
struct Cli {
    /// Predecessor snapshot JSON (generation g - 1).
    prev_snapshot: PathBuf,
    /// Successor snapshot JSON (generation g).
    curr_snapshot: PathBuf,
    /// Optional TOML file with the stable `CheckerConfig` defaults (§4.10).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Generation number attached to the delta log filename.
    #[arg(long, default_value_t = 0)]
    generation: u64,
    /// Directory the per-generation delta log is written into.
    #[arg(long, default_value = ".")]
    trial_dir: PathBuf,
    /// Overrides the config file's `namespace`.
    #[arg(long)]
    namespace: Option<String>,
    /// Overrides the config file's `enable_analysis` to `true`.
    #[arg(long)]
    enable_analysis: bool,
    /// Overrides the config file's `enable_health_oracle` to `false`.
    #[arg(long)]
    disable_health_oracle: bool,
    /// Overrides the config file's `enable_wildcard_fallback` to `false`.
    #[arg(long)]
    disable_wildcard_fallback: bool,
}

/// The on-disk shape of a `Snapshot` (§3): `checker_core::Snapshot` itself
/// has no `Deserialize` impl since the core never reads snapshots from
/// disk — that's this binary's job, not the library's.
#[derive(Debug, Deserialize)]
struct SnapshotFile {
    input: Value,
    #[serde(default)]
    cli_result: ApplyCliResult,
    #[serde(default)]
    system_state: SystemState,
    #[serde(default)]
    operator_log: Vec<String>,
}

fn load_snapshot(path: &std::path::Path) -> CliResult<checker_core::Snapshot> {
    let raw = fs::read_to_string(path).map_err(|source| CliError::ReadSnapshot {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: SnapshotFile = serde_json::from_str(&raw).map_err(|source| CliError::ParseSnapshot {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(checker_core::Snapshot::new(
        parsed.input,
        parsed.cli_result,
        parsed.system_state,
        parsed.operator_log,
    ))
}

fn run(cli: &Cli) -> CliResult<RunResult> {
    let mut config = ConfigFile::load(cli.config.as_deref())?;
    if cli.enable_analysis {
        config.enable_analysis = true;
    }
    if cli.disable_health_oracle {
        config.enable_health_oracle = false;
    }
    if cli.disable_wildcard_fallback {
        config.enable_wildcard_fallback = false;
    }
    if let Some(namespace) = &cli.namespace {
        config.namespace.clone_from(namespace);
    }
    let config = config.into_checker_config()?;

    let prev_snapshot = load_snapshot(&cli.prev_snapshot)?;
    let curr_snapshot = load_snapshot(&cli.curr_snapshot)?;

    // No schema loader / static analysis producer is wired up here (§1, §6
    // name both as out-of-scope external collaborators); the CLI checks
    // against the empty schema, exercising the differ and oracle battery
    // but not SkipEngine rules D1/D3/D4.
    let schema = StaticInputModel::new(SchemaNode::object(Path::root(), BTreeMap::new()));
    let mut checker = Checker::new(
        Box::new(schema),
        Box::new(JsonLogParser::new()),
        Box::new(KeywordInvalidInputClassifier::with_default_markers()),
        config,
        cli.trial_dir.clone(),
        BTreeMap::new(),
        Vec::new(),
    )?;

    Ok(checker.check(&curr_snapshot, &prev_snapshot, cli.generation))
}

fn exit_code_for(result: &RunResult) -> ExitCode {
    match result {
        RunResult::Pass | RunResult::Unchanged => ExitCode::SUCCESS,
        RunResult::ConnectionRefused => ExitCode::from(3),
        RunResult::InvalidInput { .. } => ExitCode::from(4),
        RunResult::Error { .. } => ExitCode::from(1),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(result) => {
            println!("{result:#?}");
            exit_code_for(&result)
        }
        Err(error) => {
            eprintln!("{}", render_runtime_error(error));
            ExitCode::from(2)
        }
    }
}
