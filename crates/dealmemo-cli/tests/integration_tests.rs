//! Integration tests for the dealmemo CLI binary

use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

/// Helper to run the CLI with arguments
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new("cargo")
        .args(["run", "-q", "-p", "dealmemo-cli", "--"])
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn pitch_deck(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".txt").expect("failed to create temp file");
    file.write_all(contents.as_bytes()).expect("failed to write pitch deck");
    file
}

#[test]
fn test_help() {
    let output = run_cli(&["--help"]);
    let out = stdout(&output);

    assert!(out.contains("deal memo"));
    assert!(out.contains("analyze"));
    assert!(out.contains("completions"));
}

#[test]
fn test_version() {
    let output = run_cli(&["--version"]);
    let out = stdout(&output);

    assert!(out.contains("dealmemo"));
}

#[test]
fn test_analyze_help() {
    let output = run_cli(&["analyze", "--help"]);
    let out = stdout(&output);

    assert!(out.contains("--sector"));
    assert!(out.contains("--weighting-profile"));
}

#[test]
fn test_analyze_produces_json_deal_memo() {
    let deck = pitch_deck(
        "Company: Acme Analytics\n\
         Sector: saas\n\
         We are Acme Analytics, a SaaS platform for sales teams.\n\
         Our ARR is $2M, with a growth rate of 15% and customers: 150, and a team of 25.\n\
         We have raised $5M and our TAM is $50B.",
    );

    let output = run_cli(&[
        "--format",
        "json",
        "analyze",
        deck.path().to_str().unwrap(),
        "--sector",
        "saas",
    ]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let memo: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("output should be valid JSON");
    assert!(memo.get("summary").is_some());
    assert!(memo.get("investmentRecommendation").is_some());
}

#[test]
fn test_analyze_missing_input_reports_an_error() {
    let output = run_cli(&["analyze", "/nonexistent/deck.txt", "--sector", "saas"]);
    assert!(!output.status.success());
    assert!(!stderr(&output).is_empty());
}

#[test]
fn test_completions_bash() {
    let output = run_cli(&["completions", "bash"]);
    assert!(output.status.success());
    assert!(!stdout(&output).is_empty());
}
