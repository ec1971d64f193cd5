use std::{fs, process::Command};

use tempfile::tempdir;

fn run_checker(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_checker"))
        .args(args)
        .output()
        .unwrap_or_else(|error| panic!("failed to run checker: {error}"))
}

fn write_snapshot(dir: &std::path::Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap_or_else(|error| panic!("failed to write {name}: {error}"));
    path.to_string_lossy().into_owned()
}

#[test]
fn passes_when_input_and_state_agree() {
    let tempdir = tempdir().unwrap_or_else(|error| panic!("failed to create tempdir: {error}"));
    let prev = write_snapshot(
        tempdir.path(),
        "prev.json",
        r#"{"input": {"spec": {"replicas": 3}}, "system_state": {"stateful_set": {"db": {"spec": {"replicas": 3}}}}}"#,
    );
    let curr = write_snapshot(
        tempdir.path(),
        "curr.json",
        r#"{"input": {"spec": {"replicas": 5}}, "system_state": {"stateful_set": {"db": {"spec": {"replicas": 5}}}}}"#,
    );

    let output = run_checker(&[&prev, &curr, "--trial-dir", tempdir.path().to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Pass"), "expected Pass in stdout, got: {stdout}");

    let delta_log = tempdir.path().join("delta-0.log");
    assert!(delta_log.exists(), "checker must still write the per-generation delta log");
}

#[test]
fn reports_state_mismatch_as_error_exit_code() {
    let tempdir = tempdir().unwrap_or_else(|error| panic!("failed to create tempdir: {error}"));
    let prev = write_snapshot(
        tempdir.path(),
        "prev.json",
        r#"{"input": {"spec": {"replicas": 3}}, "system_state": {"stateful_set": {"db": {"spec": {"replicas": 3}}}}}"#,
    );
    let curr = write_snapshot(
        tempdir.path(),
        "curr.json",
        r#"{"input": {"spec": {"replicas": 5}}, "system_state": {"stateful_set": {"db": {"spec": {"replicas": 2}}}}}"#,
    );

    let output = run_checker(&[&prev, &curr, "--trial-dir", tempdir.path().to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Error"), "expected Error verdict in stdout, got: {stdout}");
}

#[test]
fn connection_refused_stderr_short_circuits_to_dedicated_exit_code() {
    let tempdir = tempdir().unwrap_or_else(|error| panic!("failed to create tempdir: {error}"));
    let prev = write_snapshot(tempdir.path(), "prev.json", r#"{"input": {"spec": {"replicas": 3}}}"#);
    let curr = write_snapshot(
        tempdir.path(),
        "curr.json",
        r#"{"input": {"spec": {"replicas": 5}}, "cli_result": {"stdout": "", "stderr": "connection refused"}}"#,
    );

    let output = run_checker(&[&prev, &curr, "--trial-dir", tempdir.path().to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(3));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ConnectionRefused"), "got: {stdout}");
}

#[test]
fn missing_snapshot_file_is_reported_as_typed_io_error() {
    let tempdir = tempdir().unwrap_or_else(|error| panic!("failed to create tempdir: {error}"));
    let curr = write_snapshot(tempdir.path(), "curr.json", r#"{"input": {}}"#);

    let output = run_checker(&[
        tempdir.path().join("missing.json").to_str().unwrap(),
        &curr,
        "--trial-dir",
        tempdir.path().to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[io]"), "got: {stderr}");
}

#[test]
fn config_file_disables_health_oracle() {
    let tempdir = tempdir().unwrap_or_else(|error| panic!("failed to create tempdir: {error}"));
    let prev = write_snapshot(tempdir.path(), "prev.json", r#"{"input": {}}"#);
    let curr = write_snapshot(
        tempdir.path(),
        "curr.json",
        r#"{"input": {}, "system_state": {"deployment": {"web": {"spec": {"replicas": 3}, "status": {"replicas": 3, "ready_replicas": 1, "updated_replicas": 3}}}}}"#,
    );
    let config = write_snapshot(tempdir.path(), "checker.toml", "enable_health_oracle = false\n");

    let output = run_checker(&[
        &prev,
        &curr,
        "--config",
        &config,
        "--trial-dir",
        tempdir.path().to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Pass"), "got: {stdout}");
}
