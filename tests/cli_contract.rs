//! CLI contract tests: exit codes and stdio of the `monkey` binary.
//!
//! A run with no positional argument drops straight into an interactive
//! session; with no pty attached, `assert_cmd` gives it a closed stdin, so
//! the REPL sees immediate EOF and exits 0 without blocking.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn monkey_cmd() -> Command {
    Command::cargo_bin("monkey").expect("failed to find monkey binary")
}

fn script(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("failed to write temp script");
    path
}

#[test]
fn running_with_no_arguments_prints_banner_and_exits_zero_on_stdin_eof() {
    monkey_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("Monkey programming language"));
}

#[test]
fn running_a_valid_script_exits_zero() {
    let temp = TempDir::new().unwrap();
    let file = script(&temp, "valid.monkey", "let x = 1 + 2; x;\n");

    monkey_cmd().arg(&file).assert().success();
}

#[test]
fn running_a_script_does_not_print_the_interactive_banner() {
    let temp = TempDir::new().unwrap();
    let file = script(&temp, "valid.monkey", "let x = 1 + 2; x;\n");

    monkey_cmd()
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Monkey programming language").not());
}

#[test]
fn running_a_script_with_a_parse_error_exits_nonzero_and_reports_it() {
    let temp = TempDir::new().unwrap();
    let file = script(&temp, "invalid.monkey", "let = 5;\n");

    monkey_cmd()
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("parser errors:"));
}

#[test]
fn running_a_missing_script_exits_nonzero() {
    monkey_cmd().arg("does-not-exist.monkey").assert().failure();
}

#[test]
fn a_runtime_error_in_the_script_does_not_affect_the_exit_code() {
    let temp = TempDir::new().unwrap();
    let file = script(&temp, "runtime_error.monkey", "5 + true;\n");

    // The script parses fine; `5 + true` is an in-band `Object::Error`, not a
    // parse failure, so the process still exits 0.
    monkey_cmd().arg(&file).assert().success();
}

#[test]
fn more_than_one_positional_argument_exits_one_with_usage() {
    monkey_cmd()
        .arg("one.monkey")
        .arg("two.monkey")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage: monkey [script]"));
}
