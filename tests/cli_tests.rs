//! CLI integration tests.
//!
//! Tests the jsonpp CLI commands by invoking the binary as a subprocess.

use assert_cmd::Command;
use std::io::Write;
use tempfile::NamedTempFile;

fn run_command(args: &[&str], input: &str) -> (i32, String, String) {
    let output = Command::cargo_bin("jsonpp")
        .unwrap()
        .args(args)
        .write_stdin(input)
        .output()
        .unwrap();
    let code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (code, stdout, stderr)
}

fn run_canon(input: &str) -> (i32, String, String) {
    run_command(&["canon"], input)
}

fn run_check(input: &str) -> (i32, String, String) {
    run_command(&["check"], input)
}

fn temp_json(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

// ============================================================================
// Demo and Version Tests
// ============================================================================

#[test]
fn cli_demo_prints_sorted_document() {
    let (code, stdout, stderr) = run_command(&["demo"], "");
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert_eq!(
        stdout.trim_end(),
        r#"{"key1": "value1", "key2": false, "key3": [1, 2, 3]}"#
    );
}

#[test]
fn cli_version() {
    let (code, stdout, _stderr) = run_command(&["version"], "");
    assert_eq!(code, 0);
    assert!(stdout.starts_with("jsonpp v"), "got: {}", stdout);
}

#[test]
fn cli_no_command_prints_version() {
    let (code, stdout, _stderr) = run_command(&[], "");
    assert_eq!(code, 0);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

// ============================================================================
// Canon Command Tests
// ============================================================================

#[test]
fn cli_canon_sorts_and_reformats() {
    let input = "{\n  \"b\": [1,2.50, true],\n  \"a\": {\"y\":null, \"x\":\"s\"}\n}\n";
    let (code, stdout, stderr) = run_canon(input);
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert_eq!(
        stdout.trim_end(),
        r#"{"a": {"x": "s", "y": null}, "b": [1, 2.5, true]}"#
    );
}

#[test]
fn cli_canon_is_idempotent() {
    let (_, first, _) = run_canon(r#"[{"z": 1e2, "a": "\t"}]"#);
    let (code, second, _) = run_canon(&first);
    assert_eq!(code, 0);
    assert_eq!(first, second);
}

#[test]
fn cli_canon_reads_file() {
    let file = temp_json(r#"{"k": [3, 2, 1]}"#);
    let path = file.path().to_str().unwrap();
    let (code, stdout, _stderr) = run_command(&["canon", path], "");
    assert_eq!(code, 0);
    assert_eq!(stdout.trim_end(), r#"{"k": [3, 2, 1]}"#);
}

#[test]
fn cli_canon_invalid_json() {
    let (code, stdout, stderr) = run_canon("[1, 2,]");
    assert_eq!(code, 1, "Expected parse error exit code");
    assert!(stdout.is_empty());
    assert!(
        stderr.contains("TrailingComma at offset 5"),
        "got: {}",
        stderr
    );
}

#[test]
fn cli_canon_respects_max_depth() {
    let (code, _stdout, stderr) = run_command(&["canon", "--max-depth", "2"], "[[[1]]]");
    assert_eq!(code, 1);
    assert!(stderr.contains("NestingTooDeep"), "got: {}", stderr);

    let (code, stdout, _stderr) = run_command(&["canon", "--max-depth", "3"], "[[[1]]]");
    assert_eq!(code, 0);
    assert_eq!(stdout.trim_end(), "[[[1]]]");
}

#[test]
fn cli_max_depth_out_of_range_is_rejected() {
    let depth = 100_000;
    let input = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
    let (code, stdout, stderr) = run_command(&["check", "--max-depth", "4000000000"], &input);
    assert_eq!(code, 2, "Expected usage error exit code");
    assert!(stdout.is_empty());
    assert!(stderr.contains("--max-depth"), "got: {}", stderr);

    let (code, _stdout, _stderr) = run_command(&["check", "--max-depth", "0"], "1");
    assert_eq!(code, 2);
}

#[test]
fn cli_max_depth_at_ceiling_reports_error() {
    let depth = 100_000;
    let input = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
    let ceiling = jsonpp::MAX_NESTING_DEPTH.to_string();
    let (code, _stdout, stderr) = run_command(&["check", "--max-depth", &ceiling], &input);
    assert_eq!(code, 1);
    assert!(stderr.contains("NestingTooDeep"), "got: {}", stderr);
}

// ============================================================================
// Check Command Tests
// ============================================================================

#[test]
fn cli_check_valid_document() {
    let (code, stdout, _stderr) = run_check(r#"{"a": [null, false, 0.5]}"#);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim_end(), "ok");
}

#[test]
fn cli_check_reports_first_error() {
    let (code, _stdout, stderr) = run_check(r#"{"a" 1, }"#);
    assert_eq!(code, 1);
    assert!(stderr.contains("MissingColon at offset 5"), "got: {}", stderr);
}

#[test]
fn cli_check_empty_input() {
    let (code, _stdout, stderr) = run_check("");
    assert_eq!(code, 1);
    assert!(stderr.contains("UnexpectedEnd"), "got: {}", stderr);
}

#[test]
fn cli_check_invalid_utf8_is_parse_error() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"[\"ab\xFF\"]").unwrap();
    let path = file.path().to_str().unwrap();
    let (code, _stdout, stderr) = run_command(&["check", path], "");
    assert_eq!(code, 1, "Expected parse error exit code");
    assert!(stderr.contains("InvalidUtf8 at offset 4"), "got: {}", stderr);
}

#[test]
fn cli_check_file_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    let (code, _stdout, stderr) = run_command(&["check", missing.to_str().unwrap()], "");
    assert_eq!(code, 2, "Expected I/O error exit code");
    assert!(stderr.starts_with("error:"), "got: {}", stderr);
}
