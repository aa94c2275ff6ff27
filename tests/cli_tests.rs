use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

fn write_prd(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("prd.txt");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_cli_help() {
    let mut cmd = cargo_bin_cmd!("planpilot");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Deterministic PRD to execution plan compiler",
        ))
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("categories"));
}

#[test]
fn test_cli_version() {
    let mut cmd = cargo_bin_cmd!("planpilot");
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("planpilot"));
}

#[test]
fn test_analyze_help() {
    let mut cmd = cargo_bin_cmd!("planpilot");
    cmd.args(["analyze", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("--registry"))
        .stdout(predicate::str::contains("--pretty"));
}

#[test]
fn test_analyze_emits_plan_json() {
    let dir = TempDir::new().unwrap();
    let prd = write_prd(&dir, "The service must expose a REST API endpoint.");

    let mut cmd = cargo_bin_cmd!("planpilot");
    let output = cmd.arg("analyze").arg(&prd).output().unwrap();
    assert!(output.status.success());

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plan["requirements"][0]["id"], "req_1");
    assert_eq!(plan["requirements"][0]["type"], "api");
    assert!(plan["execution_plan"]["total_phases"].as_u64().unwrap() >= 1);
}

#[test]
fn test_analyze_is_deterministic() {
    let dir = TempDir::new().unwrap();
    let prd = write_prd(
        &dir,
        "Requirement: SQL database backup.\n\nRequirement: responsive frontend form.",
    );

    let first = cargo_bin_cmd!("planpilot").arg("analyze").arg(&prd).output().unwrap();
    let second = cargo_bin_cmd!("planpilot").arg("analyze").arg(&prd).output().unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_analyze_sequential_matches_default() {
    let dir = TempDir::new().unwrap();
    let prd = write_prd(
        &dir,
        "Requirement: SQL database backup.\n\nRequirement: intelligent analysis.",
    );

    let pooled = cargo_bin_cmd!("planpilot").arg("analyze").arg(&prd).output().unwrap();
    let sequential = cargo_bin_cmd!("planpilot")
        .args(["analyze", "--sequential"])
        .arg(&prd)
        .output()
        .unwrap();
    assert_eq!(pooled.stdout, sequential.stdout);
}

#[test]
fn test_analyze_with_config_file() {
    let dir = TempDir::new().unwrap();
    let prd = write_prd(&dir, "The form must validate input.");
    let config = dir.path().join("config.toml");
    fs::write(
        &config,
        "environment = \"production\"\nmax_parallel_workers = 2\n",
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("planpilot");
    let output = cmd
        .arg("analyze")
        .arg(&prd)
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert!(output.status.success());
    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plan["config"]["environment"], "production");
}

#[test]
fn test_analyze_rejects_invalid_config() {
    let dir = TempDir::new().unwrap();
    let prd = write_prd(&dir, "The form must validate input.");
    let config = dir.path().join("config.toml");
    fs::write(&config, "max_parallel_workers = 0\n").unwrap();

    let mut cmd = cargo_bin_cmd!("planpilot");
    cmd.arg("analyze")
        .arg(&prd)
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_parallel_workers"));
}

#[test]
fn test_analyze_missing_file_fails() {
    let mut cmd = cargo_bin_cmd!("planpilot");
    cmd.args(["analyze", "/nonexistent/prd.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_categories_lists_registry() {
    let mut cmd = cargo_bin_cmd!("planpilot");
    cmd.arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("ui:"))
        .stdout(predicate::str::contains("rpabrowser"))
        .stdout(predicate::str::contains("rpaenterprise"));
}
