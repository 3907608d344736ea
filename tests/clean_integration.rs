//! Integration tests for full cleanup runs.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

/// Binary pointed at `root`, isolated from any user config.
fn legacy_sweep(root: &Path, config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("legacy-sweep").unwrap();
    cmd.env("LEGACY_SWEEP_ROOT", root)
        .env("XDG_CONFIG_HOME", config_home)
        .env_remove("RUST_LOG");
    cmd
}

/// A project tree touched by every phase of the built-in rules.
fn create_test_project() -> (TempDir, TempDir) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    fs::create_dir_all(root.join("src/components")).unwrap();
    fs::write(root.join("src/components/Button.tsx"), "export {}").unwrap();
    fs::write(root.join("src/components/Button.test.tsx"), "x".repeat(2000)).unwrap();
    fs::write(root.join("src/api.spec.ts"), "x".repeat(1000)).unwrap();
    fs::write(root.join("foo.test.ts"), "x".repeat(500)).unwrap();

    fs::create_dir_all(root.join("node_modules/lib")).unwrap();
    fs::write(root.join("node_modules/lib/index.test.js"), "x").unwrap();

    fs::create_dir_all(root.join("backups/2024")).unwrap();
    fs::write(root.join("backups/2024/db.sql"), "x".repeat(4000)).unwrap();
    fs::create_dir_all(root.join("playwright-report")).unwrap();
    fs::write(root.join("playwright-report/index.html"), "<html/>").unwrap();

    fs::write(root.join("vitest.config.ts"), "export default {}").unwrap();
    fs::write(root.join("restaurant.json"), "{}").unwrap();

    fs::write(root.join("README.md"), "# App").unwrap();
    fs::write(root.join("LICENSE.md"), "MIT").unwrap();
    fs::write(root.join("NOTES.md"), "scratch").unwrap();
    fs::write(root.join("TODO.md"), "later").unwrap();

    (tmp, TempDir::new().unwrap())
}

fn snapshot(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .flatten()
        .map(|e| e.into_path())
        .collect()
}

#[test]
fn test_force_removes_every_candidate() {
    let (tmp, config_home) = create_test_project();
    let root = tmp.path();

    legacy_sweep(root, config_home.path())
        .arg("--force")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleanup Complete!"))
        .stdout(predicate::str::contains("Total items deleted: 9"));

    assert!(!root.join("foo.test.ts").exists());
    assert!(!root.join("src/api.spec.ts").exists());
    assert!(!root.join("src/components/Button.test.tsx").exists());
    assert!(!root.join("backups").exists());
    assert!(!root.join("playwright-report").exists());
    assert!(!root.join("vitest.config.ts").exists());
    assert!(!root.join("restaurant.json").exists());
    assert!(!root.join("NOTES.md").exists());
    assert!(!root.join("TODO.md").exists());

    assert!(root.join("src/components/Button.tsx").exists());
    assert!(root.join("node_modules/lib/index.test.js").exists());
    assert!(root.join("README.md").exists());
    assert!(root.join("LICENSE.md").exists());
}

#[test]
fn test_dry_run_preserves_all() {
    let (tmp, config_home) = create_test_project();
    let before = snapshot(tmp.path());

    legacy_sweep(tmp.path(), config_home.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("DRY RUN MODE"))
        .stdout(predicate::str::contains(
            "[DRY RUN] Would delete 1 files matching '*.test.ts'",
        ))
        .stdout(predicate::str::contains("[DRY RUN] Would delete: Backup directory"))
        .stdout(predicate::str::contains(
            "[DRY RUN] Would delete: Vitest configuration",
        ))
        .stdout(predicate::str::contains("[DRY RUN] Would delete 2 markdown files"))
        .stdout(predicate::str::contains("DRY RUN SUMMARY"))
        .stdout(predicate::str::contains("Total items deleted").not());

    assert_eq!(snapshot(tmp.path()), before);
}

#[test]
fn test_dry_run_beats_force() {
    let (tmp, config_home) = create_test_project();
    let before = snapshot(tmp.path());

    legacy_sweep(tmp.path(), config_home.path())
        .args(["--force", "--dry-run"])
        .assert()
        .success();

    assert_eq!(snapshot(tmp.path()), before);
}

#[test]
fn test_second_force_run_finds_nothing() {
    let (tmp, config_home) = create_test_project();

    legacy_sweep(tmp.path(), config_home.path())
        .arg("--force")
        .assert()
        .success();

    legacy_sweep(tmp.path(), config_home.path())
        .arg("--force")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total items deleted: 0"))
        .stdout(predicate::str::contains("error(s)").not());
}

#[test]
fn test_declining_keeps_files() {
    let (tmp, config_home) = create_test_project();
    let before = snapshot(tmp.path());

    legacy_sweep(tmp.path(), config_home.path())
        .write_stdin("n\n".repeat(20))
        .assert()
        .success()
        .stdout(predicate::str::contains("Delete Backup directory? (y/n)"))
        .stdout(predicate::str::contains("Total items deleted: 0"));

    assert_eq!(snapshot(tmp.path()), before);
}

#[test]
fn test_closed_stdin_counts_as_no() {
    let (tmp, config_home) = create_test_project();

    legacy_sweep(tmp.path(), config_home.path())
        .arg("--interactive")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total items deleted: 0"));

    assert!(tmp.path().join("backups/2024/db.sql").exists());
}

#[test]
fn test_interactive_answers_apply_in_order() {
    let tmp = TempDir::new().unwrap();
    let config_home = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("backups")).unwrap();
    fs::write(tmp.path().join("vitest.config.ts"), "x").unwrap();

    legacy_sweep(tmp.path(), config_home.path())
        .arg("--interactive")
        .write_stdin("yes\nno\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted: Backup directory"))
        .stdout(predicate::str::contains("Total items deleted: 1"));

    assert!(!tmp.path().join("backups").exists());
    assert!(tmp.path().join("vitest.config.ts").exists());
}

#[test]
fn test_failed_candidate_sets_exit_code_but_run_continues() {
    let tmp = TempDir::new().unwrap();
    let config_home = TempDir::new().unwrap();
    let root = tmp.path();
    // the matching directory goes first and takes its matching child with it
    fs::create_dir_all(root.join("legacy.test.ts")).unwrap();
    fs::write(root.join("legacy.test.ts/nested.test.ts"), "x").unwrap();
    fs::write(root.join("restaurant.json"), "{}").unwrap();
    fs::write(root.join("NOTES.md"), "x").unwrap();

    legacy_sweep(root, config_home.path())
        .arg("--force")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Encountered 1 error(s):"))
        .stdout(predicate::str::contains(
            "Failed to delete TypeScript test files (legacy.test.ts/nested.test.ts)",
        ))
        .stdout(predicate::str::contains("Total items deleted: 3"));

    assert!(!root.join("restaurant.json").exists());
    assert!(!root.join("NOTES.md").exists());
}

#[test]
fn test_custom_rules_from_config() {
    let tmp = TempDir::new().unwrap();
    let config_home = TempDir::new().unwrap();
    let root = tmp.path();
    fs::create_dir_all(root.join("vendor/pkg")).unwrap();
    fs::write(root.join("vendor/pkg/old.bak"), "x").unwrap();
    fs::write(root.join("src.bak"), "x").unwrap();
    fs::create_dir(root.join("tmp")).unwrap();
    fs::write(root.join("CHANGELOG.md"), "x").unwrap();
    fs::write(root.join("foo.test.ts"), "x").unwrap();

    let config_path = config_home.path().join("rules.toml");
    fs::write(
        &config_path,
        r#"
[rules]
excluded_dirs = ["vendor"]

[[rules.entries]]
kind = "glob"
pattern = "*.bak"
description = "Backup copies"

[[rules.entries]]
kind = "directory"
name = "tmp"
description = "Scratch directory"

[[rules.entries]]
kind = "keep_markdown"
names = ["CHANGELOG.md"]
"#,
    )
    .unwrap();

    legacy_sweep(root, config_home.path())
        .arg("--force")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total items deleted: 2"));

    assert!(!root.join("src.bak").exists());
    assert!(!root.join("tmp").exists());
    assert!(root.join("vendor/pkg/old.bak").exists());
    assert!(root.join("CHANGELOG.md").exists());
    assert!(root.join("foo.test.ts").exists());
}

#[test]
fn test_rules_from_default_config_location() {
    let tmp = TempDir::new().unwrap();
    let config_home = TempDir::new().unwrap();
    fs::write(tmp.path().join("vitest.config.ts"), "x").unwrap();
    fs::write(tmp.path().join("old.log"), "x").unwrap();

    let config_dir = config_home.path().join("legacy-sweep");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        r#"
[[rules.entries]]
kind = "file"
name = "old.log"
description = "Stale log"
"#,
    )
    .unwrap();

    legacy_sweep(tmp.path(), config_home.path())
        .arg("--force")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted: Stale log"));

    assert!(!tmp.path().join("old.log").exists());
    assert!(tmp.path().join("vitest.config.ts").exists());
}
