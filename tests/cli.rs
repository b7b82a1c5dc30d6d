use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

const LINTED: &str = "package main\n\nfunc f(s []int) bool {\n\treturn s == nil\n}\n";
const CLEAN: &str = "package main\n\nfunc f(s []int) bool {\n\treturn len(s) == 0\n}\n";

fn nillint() -> Command {
    let mut cmd = Command::cargo_bin("nillint").unwrap();
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_reports_diagnostic_and_exits_with_failure() {
    let directory = TempDir::new().unwrap();
    fs::write(directory.path().join("test.go"), LINTED).unwrap();

    let assert = nillint()
        .current_dir(directory.path())
        .args([".", "--output-format", "concise"])
        .assert()
        .code(1);

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("test.go"));
    assert!(stdout.contains("nil_slice_comparison"));
    assert!(stdout.contains("slice compared to nil"));
    assert!(stdout.contains("[4:9]"));
    assert!(stdout.contains("Found 1 error."));
    assert!(stdout.contains("1 fixable with the `--fix` option."));
}

#[test]
fn test_clean_file_exits_with_success() {
    let directory = TempDir::new().unwrap();
    fs::write(directory.path().join("test.go"), CLEAN).unwrap();

    let assert = nillint()
        .current_dir(directory.path())
        .args([".", "--output-format", "concise"])
        .assert()
        .code(0);

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("All checks passed!"));
}

#[test]
fn test_no_go_files_exits_with_success() {
    let directory = TempDir::new().unwrap();

    let assert = nillint().current_dir(directory.path()).arg(".").assert().code(0);

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("No Go files found"));
}

#[test]
fn test_parse_error_exits_with_error() {
    let directory = TempDir::new().unwrap();
    fs::write(directory.path().join("broken.go"), "package main\n\nfunc f( {\n").unwrap();

    let assert = nillint()
        .current_dir(directory.path())
        .args([".", "--output-format", "concise"])
        .assert()
        .code(2);

    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("Go syntax errors"));
}

#[test]
fn test_fix_rewrites_file() {
    let directory = TempDir::new().unwrap();
    let file = directory.path().join("test.go");
    fs::write(&file, LINTED).unwrap();

    nillint()
        .current_dir(directory.path())
        .args([".", "--fix"])
        .assert()
        .code(0);

    let fixed = fs::read_to_string(&file).unwrap();
    assert!(fixed.contains("len(s) == 0"));

    // A second run finds nothing left to report.
    nillint().current_dir(directory.path()).arg(".").assert().code(0);
}

#[test]
fn test_suppressed_diagnostic_is_not_reported() {
    let directory = TempDir::new().unwrap();
    let contents =
        "package main\n\nfunc f(s []int) bool {\n\t// nillinter:ignore\n\treturn s == nil\n}\n";
    fs::write(directory.path().join("test.go"), contents).unwrap();

    nillint().current_dir(directory.path()).arg(".").assert().code(0);
}

#[test]
fn test_json_output_is_valid() {
    let directory = TempDir::new().unwrap();
    fs::write(directory.path().join("test.go"), LINTED).unwrap();

    let assert = nillint()
        .current_dir(directory.path())
        .args([".", "--output-format", "json"])
        .assert()
        .code(1);

    let output: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).unwrap();
    let diagnostics = output["diagnostics"].as_array().unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0]["message"]["name"], "nil_slice_comparison");
    assert!(output["errors"].as_array().unwrap().is_empty());
}

#[test]
fn test_unknown_rule_selection_fails() {
    let directory = TempDir::new().unwrap();
    fs::write(directory.path().join("test.go"), CLEAN).unwrap();

    let assert = nillint()
        .current_dir(directory.path())
        .args([".", "--rules", "no_such_rule"])
        .assert()
        .code(2);

    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("nillint failed"));
    assert!(stderr.contains("Unknown rule"));
}
