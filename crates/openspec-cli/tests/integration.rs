#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn openspec(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("openspec").unwrap();
    cmd.current_dir(dir.path()).env("OPENSPEC_ROOT", dir.path());
    cmd
}

fn write(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn mkdir(dir: &TempDir, rel: &str) {
    std::fs::create_dir_all(dir.path().join(rel)).unwrap();
}

fn stdout_lines(cmd: &mut Command) -> Vec<String> {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// openspec list (changes)
// ---------------------------------------------------------------------------

#[test]
fn list_without_changes_dir_fails() {
    let dir = TempDir::new().unwrap();
    openspec(&dir)
        .arg("list")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "No OpenSpec changes directory found. Run 'openspec init' first.",
        ));
}

#[test]
fn list_empty_changes_dir() {
    let dir = TempDir::new().unwrap();
    mkdir(&dir, "openspec/changes");
    openspec(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout("No active changes found.\n");
}

#[test]
fn list_counts_tasks_and_sorts() {
    let dir = TempDir::new().unwrap();
    write(
        &dir.path().join("openspec/changes/test-change/tasks.md"),
        "# Tasks\n- [x] Completed task 1\n- [x] Completed task 2\n\
         - [ ] Incomplete task 1\n- [ ] Incomplete task 2\n- [ ] Incomplete task 3\n\
         Regular text that should be ignored\n",
    );
    write(
        &dir.path().join("openspec/changes/completed/tasks.md"),
        "- [x] Task 1\n- [x] Task 2\n",
    );
    mkdir(&dir, "openspec/changes/no-tasks");
    mkdir(&dir, "openspec/changes/archive/2025-01-01-old");

    let lines = stdout_lines(openspec(&dir).arg("list"));
    assert_eq!(
        lines,
        vec![
            "Changes:",
            "  completed     ✓ Complete",
            "  no-tasks      No tasks",
            "  test-change   2/5 tasks",
        ]
    );
}

#[test]
fn list_finds_root_from_subdirectory() {
    let dir = TempDir::new().unwrap();
    mkdir(&dir, "openspec/changes/alpha");
    mkdir(&dir, "src/nested");

    let mut cmd = Command::cargo_bin("openspec").unwrap();
    cmd.current_dir(dir.path().join("src/nested"))
        .env_remove("OPENSPEC_ROOT")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("alpha"));
}

#[test]
fn rust_log_debug_enables_scan_logging() {
    let dir = TempDir::new().unwrap();
    mkdir(&dir, "openspec/changes/alpha");
    openspec(&dir)
        .env("RUST_LOG", "debug")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("alpha"))
        .stderr(predicate::str::contains("collected active changes"));
}

#[test]
fn default_log_level_keeps_stderr_quiet() {
    let dir = TempDir::new().unwrap();
    mkdir(&dir, "openspec/changes/alpha");
    openspec(&dir)
        .env_remove("RUST_LOG")
        .arg("list")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

// ---------------------------------------------------------------------------
// openspec list --specs
// ---------------------------------------------------------------------------

#[test]
fn list_specs_without_specs_dir() {
    let dir = TempDir::new().unwrap();
    openspec(&dir)
        .args(["list", "--specs"])
        .assert()
        .success()
        .stdout("No specs found.\n");
}

#[test]
fn list_specs_with_requirement_counts() {
    let dir = TempDir::new().unwrap();
    write(
        &dir.path().join("openspec/specs/auth/spec.md"),
        "# Auth\n\n## Purpose\nSign in.\n\n## Requirements\n\n\
         ### Requirement: Login\nSHALL log in.\n\n#### Scenario: ok\n- works\n\n\
         ### Requirement: Logout\nSHALL log out.\n",
    );
    write(&dir.path().join("openspec/specs/broken/spec.md"), "garbage");

    let lines = stdout_lines(openspec(&dir).args(["list", "--mode", "specs"]));
    assert_eq!(
        lines,
        vec!["Specs:", "  auth     requirements 2", "  broken   requirements 0"]
    );
}

// ---------------------------------------------------------------------------
// openspec list --archive
// ---------------------------------------------------------------------------

#[test]
fn list_archive_without_archive_dir() {
    let dir = TempDir::new().unwrap();
    mkdir(&dir, "openspec/changes");
    openspec(&dir)
        .args(["list", "--archive"])
        .assert()
        .success()
        .stdout("No archived changes found.\n");
}

#[test]
fn list_archive_newest_first_skipping_invalid() {
    let dir = TempDir::new().unwrap();
    mkdir(&dir, "openspec/changes/archive/2025-01-10-old");
    mkdir(&dir, "openspec/changes/archive/invalid-name");
    write(
        &dir.path().join("openspec/changes/archive/2025-03-15-newest/tasks.md"),
        "- [x] a\n- [ ] b\n",
    );
    mkdir(&dir, "openspec/changes/archive/2025-02-20-middle");

    let lines = stdout_lines(openspec(&dir).args(["list", "--archive"]));
    assert_eq!(
        lines,
        vec![
            "Archived Changes:",
            "  2025-03-15  newest   1/2 tasks",
            "  2025-02-20  middle   No tasks",
            "  2025-01-10  old      No tasks",
        ]
    );
}

#[test]
fn specs_and_archive_flags_conflict() {
    let dir = TempDir::new().unwrap();
    openspec(&dir)
        .args(["list", "--specs", "--archive"])
        .assert()
        .failure();
}

#[test]
fn unknown_mode_is_rejected() {
    let dir = TempDir::new().unwrap();
    openspec(&dir)
        .args(["list", "--mode", "everything"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("everything"));
}

// ---------------------------------------------------------------------------
// --json
// ---------------------------------------------------------------------------

#[test]
fn list_json() {
    let dir = TempDir::new().unwrap();
    write(
        &dir.path().join("openspec/changes/add-login/tasks.md"),
        "- [x] a\n- [ ] b\n",
    );

    let output = openspec(&dir)
        .args(["list", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["changes"][0]["name"], "add-login");
    assert_eq!(json["changes"][0]["completed_tasks"], 1);
    assert_eq!(json["changes"][0]["total_tasks"], 2);
}

#[test]
fn list_archive_json_empty() {
    let dir = TempDir::new().unwrap();
    let output = openspec(&dir)
        .args(["-j", "list", "--archive"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["archive"], serde_json::json!([]));
}
