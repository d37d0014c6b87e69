//! End-to-end tests for the `scrcpy-form` binary.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn scrcpy_form_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_scrcpy-form"))
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn run_cli(args: &[&str]) -> Output {
    Command::new(scrcpy_form_bin())
        .args(args)
        .env_remove("SCRCPY_FORM_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run scrcpy-form")
}

fn page() -> String {
    fixture("scrcpy.1").to_str().unwrap().to_string()
}

// ---- options ----

#[test]
fn test_options_json_lists_descriptors() {
    let page = page();
    let output = run_cli(&["options", "--format", "json", "--manpage", &page]);

    assert!(
        output.status.success(),
        "options failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout)
        .unwrap_or_else(|e| panic!("Invalid JSON output: {e}\n{stdout}"));
    let names: Vec<&str> = parsed
        .as_array()
        .expect("array of options")
        .iter()
        .map(|option| option["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec!["--fullscreen", "--max-size", "--turn-screen-off", "--window-title"]
    );
    assert_eq!(parsed[1]["has_value"], true);
}

#[test]
fn test_options_json_with_report_wraps_both() {
    let page = page();
    let output = run_cli(&[
        "options",
        "--format",
        "json",
        "--with-report",
        "--manpage",
        &page,
    ]);

    assert!(output.status.success());
    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid JSON output");
    assert!(parsed["options"].is_array());
    assert_eq!(parsed["report"]["options_found"], 4);
    assert_eq!(parsed["report"]["directive_lines"], 4);
}

#[test]
fn test_options_table_is_default() {
    let page = page();
    let output = run_cli(&["options", "--manpage", &page]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("OPTION"));
    assert!(stdout.contains("--window-title"));
}

#[test]
fn test_page_without_options_is_fatal() {
    let empty = fixture("empty.1");
    let output = run_cli(&["options", "--manpage", empty.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Could not parse scrcpy options from manpage"),
        "unexpected stderr: {stderr}"
    );
}

#[test]
fn test_missing_manpage_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.1");
    let output = run_cli(&["run", "--dry-run", "--manpage", missing.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Could not parse"));
}

// ---- run ----

#[test]
fn test_run_dry_run_prints_command_in_form_order() {
    let page = page();
    let output = run_cli(&[
        "run",
        "--dry-run",
        "--manpage",
        &page,
        "--set",
        "--window-title=Pixel 7",
        "--flag",
        "--fullscreen",
        "--set",
        "--max-size=1024",
    ]);

    assert!(
        output.status.success(),
        "run failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "scrcpy --fullscreen --max-size 1024 --window-title 'Pixel 7'"
    );
}

#[test]
fn test_run_rejects_unknown_option() {
    let page = page();
    let output = run_cli(&["run", "--dry-run", "--manpage", &page, "--flag", "--turbo"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown option: --turbo"));
}

#[test]
fn test_run_rejects_value_for_switch() {
    let page = page();
    let output = run_cli(&[
        "run",
        "--dry-run",
        "--manpage",
        &page,
        "--set",
        "--fullscreen=yes",
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("does not take a value"));
}

#[test]
fn test_run_reports_missing_executable() {
    let page = page();
    let output = run_cli(&[
        "run",
        "--manpage",
        &page,
        "--executable",
        "scrcpy-form-no-such-program",
        "--flag",
        "--fullscreen",
    ]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("scrcpy-form-no-such-program executable not found in PATH"),
        "unexpected stderr: {stderr}"
    );
}

#[cfg(unix)]
#[test]
fn test_run_propagates_child_exit_code() {
    let page = page();
    let output = run_cli(&["run", "--manpage", &page, "--executable", "false"]);
    assert_eq!(output.status.code(), Some(1));

    let output = run_cli(&["run", "--manpage", &page, "--executable", "true"]);
    assert!(output.status.success());
}

#[test]
fn test_config_defaults_prefill_the_form() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("scrcpy-form.yml");
    fs::write(
        &config,
        format!(
            "executable: scrcpy-beta\nmanpage: {}\ndefaults:\n  --turn-screen-off: true\n  --max-size: 800\n  --unknown: true\n",
            page()
        ),
    )
    .unwrap();

    let output = run_cli(&[
        "run",
        "--dry-run",
        "--config",
        config.to_str().unwrap(),
        "--set",
        "--max-size=1920",
    ]);

    assert!(
        output.status.success(),
        "run failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "scrcpy-beta --max-size 1920 --turn-screen-off"
    );
}

#[test]
fn test_invalid_config_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("bad.yml");
    fs::write(&config, "timeout_secs: soon\n").unwrap();

    let page = page();
    let output = run_cli(&[
        "run",
        "--dry-run",
        "--manpage",
        &page,
        "--config",
        config.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load configuration"));
}

// ---- form ----

#[test]
fn test_form_dry_run_reads_answers_from_stdin() {
    let page = page();
    let mut child = Command::new(scrcpy_form_bin())
        .args(["form", "--dry-run", "--manpage", &page])
        .env_remove("SCRCPY_FORM_CONFIG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn scrcpy-form");

    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"y\n800\n\nMy phone\nn\n")
        .expect("write answers");
    let output = child.wait_with_output().expect("wait for scrcpy-form");

    assert!(
        output.status.success(),
        "form failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--fullscreen [y/N]: "));
    assert!(
        stdout.contains("scrcpy --fullscreen --max-size 800 --window-title 'My phone'"),
        "unexpected stdout: {stdout}"
    );
}
