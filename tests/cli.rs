//! Integration tests for the `fib` binary.
//!
//! Each test runs the built executable in a scratch directory so that no
//! `fib.toml` from the developer's checkout or home directory leaks in.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

fn fib_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_fib"))
}

/// Run `fib` in `dir` with an isolated home directory.
fn run_fib(dir: &Path, args: &[&str]) -> Output {
    Command::new(fib_binary())
        .args(args)
        .current_dir(dir)
        .env("HOME", dir)
        .env("USERPROFILE", dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute fib")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_no_args_prints_default_bound() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_fib(dir.path(), &[]);

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "0 1 1 2 3 5 8 13 21 34 55 89 144 233 377\n");
}

#[test]
fn test_print_known_bounds() {
    let dir = tempfile::tempdir().unwrap();
    let cases = [
        ("0", "\n"),
        ("1", "0\n"),
        ("2", "0 1 1\n"),
        ("5", "0 1 1 2 3\n"),
        ("10", "0 1 1 2 3 5 8\n"),
    ];

    for (bound, expected) in cases {
        let output = run_fib(dir.path(), &["print", bound]);
        assert!(output.status.success(), "bound {bound} failed");
        assert_eq!(stdout_of(&output), expected, "bound {bound}");
    }
}

#[test]
fn test_negative_bound_prints_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_fib(dir.path(), &["print", "-7"]);

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "\n");
}

#[test]
fn test_no_newline_and_separator() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_fib(dir.path(), &["print", "10", "--separator", ",", "--no-newline"]);

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "0,1,1,2,3,5,8");
}

#[test]
fn test_json_format() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_fib(dir.path(), &["print", "10", "--format", "json"]);

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "{\"bound\":10,\"terms\":[0,1,1,2,3,5,8]}\n");
}

#[test]
fn test_table_command() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_fib(dir.path(), &["table", "5"]);

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Term"));
    assert!(stdout.contains("│ 4 │ 3    │"));
    assert_eq!(stdout.lines().count(), 9);
}

#[test]
fn test_local_config_is_used() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("fib.toml"),
        "[sequence]\nbound = 5\n\n[output]\nseparator = \"-\"\n",
    )
    .unwrap();

    let output = run_fib(dir.path(), &[]);
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "0-1-1-2-3\n");

    // CLI bound wins over the config file
    let output = run_fib(dir.path(), &["print", "2"]);
    assert_eq!(stdout_of(&output), "0-1-1\n");
}

// dirs resolves the home directory through the shell API on Windows
#[cfg(not(windows))]
#[test]
fn test_global_config_is_used() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join(".fib")).unwrap();
    fs::write(dir.path().join(".fib").join("config.toml"), "[sequence]\nbound = 3\n").unwrap();

    let output = run_fib(dir.path(), &[]);
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "0 1 1 2\n");
}

#[test]
fn test_explicit_config_flag() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("custom.toml");
    fs::write(&config, "[output]\nformat = \"json\"\n").unwrap();

    let output = run_fib(dir.path(), &["print", "2", "--config", config.to_str().unwrap()]);
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "{\"bound\":2,\"terms\":[0,1,1]}\n");
}

#[test]
fn test_missing_explicit_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_fib(dir.path(), &["--config", "does-not-exist.toml"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does-not-exist.toml"), "stderr: {stderr}");
    assert!(output.stdout.is_empty());
}

#[test]
fn test_invalid_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("fib.toml"), "[output]\nformat = \"xml\"\n").unwrap();

    let output = run_fib(dir.path(), &[]);
    assert!(!output.status.success());
}

#[test]
fn test_verbose_logs_go_to_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_fib(dir.path(), &["-vv", "print", "5"]);

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "0 1 1 2 3\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("sequence written"), "stderr: {stderr}");
}

#[test]
fn test_completion_script() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_fib(dir.path(), &["completion", "bash"]);

    assert!(output.status.success());
    assert!(stdout_of(&output).contains("fib"));
}

#[test]
fn test_repeated_runs_are_identical() {
    let dir = tempfile::tempdir().unwrap();
    let first = run_fib(dir.path(), &["print", "1000"]);
    let second = run_fib(dir.path(), &["print", "1000"]);
    assert_eq!(first.stdout, second.stdout);
}

/// Spawn `fib` with stdout piped and close the read end straight away.
fn run_fib_with_closed_stdout(dir: &Path, args: &[&str]) -> Output {
    let mut child = Command::new(fib_binary())
        .args(args)
        .current_dir(dir)
        .env("HOME", dir)
        .env("USERPROFILE", dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn fib");
    drop(child.stdout.take());
    child.wait_with_output().expect("Failed to wait for fib")
}

#[test]
fn test_closed_stdout_exits_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_fib_with_closed_stdout(dir.path(), &["print", "9223372036854775807"]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "stderr: {stderr}");
    assert!(!stderr.contains("panicked"), "stderr: {stderr}");
}

#[test]
fn test_completion_with_closed_stdout_exits_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_fib_with_closed_stdout(dir.path(), &["completion", "bash"]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "stderr: {stderr}");
    assert!(!stderr.contains("panicked"), "stderr: {stderr}");
}
