//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn lessonkit() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("lessonkit").unwrap();
    cmd.env_remove("LESSONKIT_CONTENT_DIR");
    cmd
}

/// A temp dir populated by `lessonkit init`.
fn initialized() -> TempDir {
    let dir = TempDir::new().unwrap();
    lessonkit()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();
    dir
}

const SEQUENCE: &str = "content/sequences/evidence-chain.toml";

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    lessonkit()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created lessonkit.toml"))
        .stdout(predicate::str::contains("evidence-chain.toml"));

    assert!(dir.path().join("lessonkit.toml").exists());
    assert!(dir.path().join("content/modules/1.toml").exists());
    assert!(dir.path().join("content/resources.toml").exists());
}

#[test]
fn init_skips_existing() {
    let dir = initialized();

    lessonkit()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn validate_initialized_content() {
    let dir = initialized();

    lessonkit()
        .current_dir(dir.path())
        .arg("validate")
        .arg("--path")
        .arg("content")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sequence: Evidence chain (5 stages)"))
        .stdout(predicate::str::contains("Module 1: Foundations (2 segments)"))
        .stdout(predicate::str::contains("Resource list (2 resources)"))
        .stdout(predicate::str::contains("All data files valid"));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty-module.toml");
    std::fs::write(
        &path,
        r#"
[module]
id = "9"
title = "Placeholder"

[[segments]]
id = "9.1"
title = "Coming soon"
"#,
    )
    .unwrap();

    lessonkit()
        .arg("validate")
        .arg("--path")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("[9.1] WARNING: segment has no videos"))
        .stdout(predicate::str::contains("1 warning(s) found"));
}

#[test]
fn validate_nonexistent_file() {
    lessonkit()
        .arg("validate")
        .arg("--path")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn resources_lists_modules_then_static() {
    let dir = initialized();

    lessonkit()
        .current_dir(dir.path())
        .arg("resources")
        .assert()
        .success()
        .stdout(predicate::str::contains("Asking questions - Introduction"))
        .stdout(predicate::str::contains("https://www.youtube.com/embed/oHg5SJYRHA0"))
        .stdout(predicate::str::contains("Cochrane Library"))
        .stdout(predicate::str::contains("6 resource(s)"));
}

#[test]
fn resources_json_filtered_by_kind() {
    let dir = initialized();

    let output = lessonkit()
        .current_dir(dir.path())
        .args(["resources", "--kind", "video", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let resources: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(resources.len(), 4);
    assert!(resources.iter().all(|r| r["kind"] == "video"));
    assert!(resources.iter().all(|r| r["module_id"] != "2"));
    assert_eq!(resources[0]["module_label"], "Module 1");
    assert_eq!(resources[3]["title"], "Risk of bias - Introduction");
}

#[test]
fn resources_rejects_unknown_kind() {
    let dir = initialized();

    lessonkit()
        .current_dir(dir.path())
        .args(["resources", "--kind", "podcast"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown resource kind"));
}

#[test]
fn play_correct_order() {
    let dir = initialized();

    lessonkit()
        .current_dir(dir.path())
        .args(["play", "--sequence", SEQUENCE])
        .args(["--order", "ask,acquire,appraise,apply,assess"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Correct!"));
}

#[test]
fn play_by_sequence_id() {
    let dir = initialized();

    lessonkit()
        .current_dir(dir.path())
        .args(["play", "--sequence", "evidence-chain"])
        .args(["--order", "ask,acquire,appraise,apply,assess"])
        .assert()
        .success()
        .stdout(predicate::str::contains("solved in 1 attempt(s)"));
}

#[test]
fn play_unknown_sequence_id() {
    let dir = initialized();

    lessonkit()
        .current_dir(dir.path())
        .args(["play", "--sequence", "no-such-game", "--order", "a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no sequence 'no-such-game'"));
}

#[test]
fn play_wrong_order_exits_nonzero() {
    let dir = initialized();

    lessonkit()
        .current_dir(dir.path())
        .args(["play", "--sequence", SEQUENCE])
        .args(["--order", "ask,appraise,acquire,apply,assess"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("position 2 is out of order"))
        .stdout(predicate::str::contains("Correct!").not());
}

#[test]
fn play_incomplete_order() {
    let dir = initialized();

    lessonkit()
        .current_dir(dir.path())
        .args(["play", "--sequence", SEQUENCE, "--order", "ask,acquire"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("incomplete submission: 2 of 5"));
}

#[test]
fn play_interactive_from_stdin() {
    let dir = initialized();

    lessonkit()
        .current_dir(dir.path())
        .args(["play", "--sequence", SEQUENCE, "--seed", "3"])
        .write_stdin(
            "place acquire\nplace ask\nremove 1\nplace acquire\nplace appraise\n\
             place apply\nplace assess\nsubmit\nsubmit\nquit\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("Evidence chain"))
        .stdout(predicate::str::contains("Correct!").count(1))
        .stdout(predicate::str::contains("Placed 5/5 (correct)"));
}

#[test]
fn help_output() {
    lessonkit()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sequencing games and resource library"));
}

#[test]
fn version_output() {
    lessonkit()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lessonkit"));
}
