//! CLI tests for the `tp` binary
//!
//! Each test runs with HOME and the XDG dirs pointed at a temp dir so config
//! discovery, logs and the plan store never touch the real user directories.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn tp(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tp").expect("tp binary should build");
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("XDG_DATA_HOME", home.path().join("data"))
        .env_remove("LLM_PROVIDER")
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn write_config(home: &TempDir, body: &str) -> std::path::PathBuf {
    let path = home.path().join("taskplanner.yml");
    fs::write(&path, body).expect("Failed to write config");
    path
}

#[test]
fn test_help_lists_commands() {
    let home = TempDir::new().unwrap();
    tp(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate").and(predicate::str::contains("plans")));
}

#[test]
fn test_generate_rejects_short_goal() {
    let home = TempDir::new().unwrap();
    tp(&home)
        .args(["generate", "   short  "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Goal must be at least 10 characters long"));
}

#[test]
fn test_generate_rejects_long_goal() {
    let home = TempDir::new().unwrap();
    let goal = "x".repeat(1001);
    tp(&home)
        .args(["generate", goal.as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Goal must be less than 1000 characters"));
}

#[test]
fn test_generate_without_api_key_is_configuration_error() {
    let home = TempDir::new().unwrap();
    let config = write_config(&home, "llm:\n  provider: openai\n  openai:\n    api-key-env: TP_CLI_TEST_MISSING_KEY\n");

    tp(&home)
        .env_remove("TP_CLI_TEST_MISSING_KEY")
        .arg("-c")
        .arg(&config)
        .args(["generate", "Plan a two week trip to Japan"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "OpenAI API key not configured. Please set TP_CLI_TEST_MISSING_KEY in the environment",
        ));
}

#[test]
fn test_unknown_provider_from_environment() {
    let home = TempDir::new().unwrap();
    tp(&home)
        .env("LLM_PROVIDER", "mistral")
        .args(["generate", "Plan a two week trip to Japan"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown LLM provider: 'mistral'"));
}

#[test]
fn test_plans_empty_store() {
    let home = TempDir::new().unwrap();
    let plans_dir = home.path().join("store");
    let config = write_config(&home, &format!("storage:\n  plans-dir: {}\n", plans_dir.display()));

    tp(&home)
        .arg("-c")
        .arg(&config)
        .arg("plans")
        .assert()
        .success()
        .stdout(predicate::str::contains("No plans found"));

    assert!(plans_dir.is_dir());
}

#[test]
fn test_plans_json_lists_stored_plans() {
    let home = TempDir::new().unwrap();
    let plans_dir = home.path().join("store");
    fs::create_dir_all(&plans_dir).unwrap();
    fs::write(
        plans_dir.join("plans.jsonl"),
        concat!(
            r#"{"id":"plan-a","goal":"Learn to bake bread","taskPlan":[],"totalEstimatedDays":0,"taskCount":0,"generatedAt":"2026-10-01T08:00:00Z"}"#,
            "\n",
            r#"{"id":"plan-b","goal":"Run a half marathon","taskPlan":[],"totalEstimatedDays":0,"taskCount":0,"generatedAt":"2026-10-02T08:00:00Z"}"#,
            "\n",
        ),
    )
    .unwrap();
    let config = write_config(&home, &format!("storage:\n  plans-dir: {}\n", plans_dir.display()));

    let output = tp(&home)
        .arg("-c")
        .arg(&config)
        .args(["plans", "--format", "json", "-n", "1"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value.as_array().map(Vec::len), Some(1));
    assert_eq!(value[0]["id"], "plan-b");
}

#[test]
fn test_show_unknown_plan_fails() {
    let home = TempDir::new().unwrap();
    let config = write_config(&home, &format!("storage:\n  plans-dir: {}\n", home.path().join("store").display()));

    tp(&home)
        .arg("-c")
        .arg(&config)
        .args(["show", "does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Plan not found: does-not-exist"));
}
