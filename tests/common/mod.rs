//! Shared integration-test helpers for running the `cuetimer` binary.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};

/// Absolute path to a file under `tests/fixtures`.
#[must_use]
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Runs `cuetimer` with `args` to completion, with logging silenced and
/// config-related environment cleared.
#[allow(clippy::missing_panics_doc)]
#[must_use]
pub fn run(args: &[&str]) -> Output {
    command(args).output().expect("failed to run cuetimer")
}

/// Builds a `cuetimer` command without running it.
#[must_use]
pub fn command(args: &[&str]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cuetimer"));
    cmd.args(args)
        .env_remove("CUETIMER_CONFIG")
        .env_remove("CUETIMER_EVENTS_FILE")
        .env_remove("CUETIMER_METRICS_PORT")
        .env_remove("CUETIMER_LOG_LEVEL")
        .env("CUETIMER_COLOR", "never");
    cmd
}

/// Stdout as a string.
#[must_use]
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Stderr as a string.
#[must_use]
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
