//! Integration tests for the sipsh binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("sipsh.toml");
    fs::write(&path, content).unwrap();
    path
}

/// Config pointing at a port nothing listens on; connect fails fast.
const UNREACHABLE_CONFIG: &str = r#"
[client]
server = "127.0.0.1"
port = "1"
institution = "main"
username = "scuser"
password = "scpass"
location_code = "desk"
"#;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::new(cargo_bin("sipsh"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Interactive SIP2 client shell"));
}

#[test]
fn cli_shows_version() {
    let mut cmd = Command::new(cargo_bin("sipsh"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn cli_unknown_option_exits_2() {
    let mut cmd = Command::new(cargo_bin("sipsh"));
    cmd.arg("--bogus");
    cmd.assert().code(2);
}

#[test]
fn piped_echo_and_quit() {
    let mut cmd = Command::new(cargo_bin("sipsh"));
    cmd.write_stdin("echo hi there\nquit\n");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#"echo args=["hi", "there"]"#))
        .stdout(predicate::str::contains("Goodbye"));
}

#[test]
fn piped_help_lists_commands_in_order() {
    let mut cmd = Command::new(cargo_bin("sipsh"));
    cmd.write_stdin("help\nexit\n");
    let output = cmd.assert().success().get_output().stdout.clone();
    let stdout = String::from_utf8(output).unwrap();

    let positions: Vec<usize> = [
        "help", "echo", "exit", "quit", "connect", "login", "status", "start", "patron-info",
    ]
    .iter()
    .map(|name| stdout.find(&format!("  {} - ", name)).unwrap())
    .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn unknown_command_goes_to_stderr_and_loop_continues() {
    let mut cmd = Command::new(cargo_bin("sipsh"));
    cmd.write_stdin("bogus\necho after\nquit\n");
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Command not found: bogus"))
        .stdout(predicate::str::contains(r#"echo args=["after"]"#));
}

#[test]
fn eof_ends_the_loop_cleanly() {
    let mut cmd = Command::new(cargo_bin("sipsh"));
    cmd.write_stdin("echo done\n");
    cmd.assert().success();
}

#[test]
fn connect_against_unreachable_server_reports_generically() {
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp, UNREACHABLE_CONFIG);

    let mut cmd = Command::new(cargo_bin("sipsh"));
    cmd.args(["-c", config.to_str().unwrap()]);
    cmd.write_stdin("connect\nquit\n");
    cmd.assert()
        .success()
        .stderr(predicate::str::contains(
            "Unable to connect to server 127.0.0.1 port 1",
        ))
        .stderr(predicate::str::contains("refused").not());
}

#[test]
fn login_without_connect_reports_precondition() {
    let mut cmd = Command::new(cargo_bin("sipsh"));
    cmd.write_stdin("login\nquit\n");
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Not connected"));
}

#[test]
fn autostart_runs_the_start_sequence() {
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp, UNREACHABLE_CONFIG);

    let mut cmd = Command::new(cargo_bin("sipsh"));
    cmd.args(["-a", "-c", config.to_str().unwrap()]);
    cmd.write_stdin("quit\n");
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Unable to connect"));
}

#[test]
fn missing_config_file_still_starts_the_shell() {
    let mut cmd = Command::new(cargo_bin("sipsh"));
    cmd.args(["-c", "/nonexistent/sipsh.toml"]);
    cmd.write_stdin("echo ok\nquit\n");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#"echo args=["ok"]"#));
}
