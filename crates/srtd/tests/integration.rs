//! End-to-end CLI tests for the `srtd` binary's `build` path.
//!
//! `apply`/`watch` need a reachable Postgres and are left to manual/CI
//! testing against a real database; `build` is fully exercisable offline
//! and covers config discovery, migration emission, and the skip-when-
//! unchanged invariant through the real subprocess.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn srtd() -> Command {
    Command::cargo_bin("srtd").unwrap()
}

fn project_with_template(name: &str, content: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    let templates = tmp.path().join("supabase/migrations-templates");
    fs::create_dir_all(&templates).unwrap();
    fs::write(templates.join(format!("{name}.sql")), content).unwrap();
    tmp
}

#[test]
fn build_emits_a_migration_file_for_a_new_template() {
    let tmp = project_with_template(
        "update_user",
        "create or replace function update_user() returns void as $$ select 1; $$ language sql;",
    );

    srtd()
        .args(["build"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("built=1"));

    let migrations = tmp.path().join("supabase/migrations");
    let entries: Vec<_> = fs::read_dir(&migrations).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn build_skips_unchanged_template_on_second_run() {
    let tmp = project_with_template("x", "select 1;");

    srtd().args(["build"]).current_dir(tmp.path()).assert().success();
    srtd()
        .args(["build"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("built=0"))
        .stdout(predicate::str::contains("skipped=1"));

    let migrations = tmp.path().join("supabase/migrations");
    let entries: Vec<_> = fs::read_dir(&migrations).unwrap().collect();
    assert_eq!(entries.len(), 1, "second run must not emit a second file");
}

#[test]
fn build_force_reemits_even_when_unchanged() {
    let tmp = project_with_template("x", "select 1;");

    srtd().args(["build"]).current_dir(tmp.path()).assert().success();
    srtd()
        .args(["build", "--force"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("built=1"));

    let migrations = tmp.path().join("supabase/migrations");
    let entries: Vec<_> = fs::read_dir(&migrations).unwrap().collect();
    assert_eq!(entries.len(), 2, "force must allocate a new migration file");
}

#[test]
fn build_never_emits_for_a_wip_template() {
    let tmp = project_with_template("draft.wip", "select 1;");

    srtd()
        .args(["build"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("built=0"));

    let migrations = tmp.path().join("supabase/migrations");
    assert!(!migrations.exists() || fs::read_dir(&migrations).unwrap().next().is_none());
}

#[test]
fn build_bundle_emits_a_single_combined_file() {
    let tmp = project_with_template("a", "select 'a';");
    fs::write(
        tmp.path().join("supabase/migrations-templates/b.sql"),
        "select 'b';",
    )
    .unwrap();

    srtd()
        .args(["build", "--bundle"])
        .current_dir(tmp.path())
        .assert()
        .success();

    let migrations = tmp.path().join("supabase/migrations");
    let entries: Vec<_> = fs::read_dir(&migrations).unwrap().collect();
    assert_eq!(entries.len(), 1);
    let name = entries[0].as_ref().unwrap().file_name();
    assert!(name.to_string_lossy().contains("bundle"));
}

#[test]
fn invalid_config_json_degrades_to_defaults_with_a_warning() {
    let tmp = project_with_template("x", "select 1;");
    fs::write(tmp.path().join(".srtdrc.json"), "{ not json").unwrap();

    srtd()
        .args(["build"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("warning:"));
}
